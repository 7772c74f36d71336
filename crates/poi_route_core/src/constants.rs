/// Mean Earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

pub const DEFAULT_ITERATIONS: usize = 1_000;
pub const DEFAULT_RESTARTS: usize = 1;
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

pub(crate) const MIN_LATITUDE: f64 = -90.0;
pub(crate) const MAX_LATITUDE: f64 = 90.0;
pub(crate) const MIN_LONGITUDE: f64 = -180.0;
pub(crate) const MAX_LONGITUDE: f64 = 180.0;

/// Built-in map loaded at startup as `(name, lat, lon)`.
pub const SEED_POINTS: [(&str, f64, f64); 10] = [
    ("Jiloyork", 19.916012, -99.580580),
    ("Toluca", 19.289165, -99.655697),
    ("Atlacomulco", 19.799520, -99.873844),
    ("Guadalajara", 20.677754, -103.346253),
    ("Monterrey", 25.691611, -100.321838),
    ("QuintanaRoo", 21.163111, -86.802315),
    ("Michoacan", 19.701400, -101.208296),
    ("Aguascalientes", 21.876410, -102.264386),
    ("CDMX", 19.432713, -99.133183),
    ("QRO", 20.597194, -100.386670),
];
