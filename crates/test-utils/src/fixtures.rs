//! Common test fixtures for WCPS query tests.
//!
//! The values mirror the public rasdaman demo coverages so expected query
//! strings in tests read like real requests.

/// Coverage identifiers.
pub mod coverages {
    /// Monthly average land temperature (Lat, Long, ansi)
    pub const AVG_LAND_TEMP: &str = "AvgLandTemp";

    /// Coverage used for multi-axis tests
    pub const S2_L2A_BANDS: &str = "S2_L2A_32631_B04_10m";
}

/// Point locations as (lat, long).
pub mod locations {
    /// Bremen, Germany
    pub const BREMEN: (f64, f64) = (53.08, 8.80);

    /// Equator / prime meridian crossing
    pub const NULL_ISLAND: (f64, f64) = (0.0, 0.0);
}

/// Date strings accepted by the `ansi` axis.
pub mod dates {
    pub const YEAR_2014: (&str, &str) = ("2014-01", "2014-12");

    pub const SUMMER_2014: (&str, &str) = ("2014-06", "2014-08");

    pub const JULY_2014: &str = "2014-07";
}

/// Clipping geometries as (lat, long) vertex lists.
pub mod geometry {
    /// Five-vertex polygon over Australia
    pub const AUSTRALIA_POLYGON: [(f64, f64); 5] = [
        (-12.3829, 132.0117),
        (-33.4314, 120.4102),
        (-18.8127, 148.5352),
        (-22.7559, 118.4766),
        (-36.3151, 143.7891),
    ];

    /// First ring of the two-polygon Australia fixture
    pub const AUSTRALIA_RING_A: [(f64, f64); 4] = [
        (-20.4270, 131.6931),
        (-28.4204, 124.1895),
        (-27.9944, 139.4604),
        (-26.3919, 129.0015),
    ];

    /// Second ring of the two-polygon Australia fixture
    pub const AUSTRALIA_RING_B: [(f64, f64); 4] = [
        (-20.4270, 131.6931),
        (-19.9527, 142.4268),
        (-27.9944, 139.4604),
        (-21.8819, 140.5151),
    ];

    /// Rendered form of `[AUSTRALIA_RING_A, AUSTRALIA_RING_B]` as a multipolygon
    pub const AUSTRALIA_MULTIPOLYGON_WKT: &str = "Multipolygon(((-20.427 131.6931,-28.4204 124.1895,-27.9944 139.4604,-26.3919 129.0015)),((-20.427 131.6931,-19.9527 142.4268,-27.9944 139.4604,-21.8819 140.5151)))";
}
