// Copyright (c) 2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The named ellipsoid presets recognised in CRS parameter strings.
//!
//! The parameters are from the EPSG Geodetic Parameter Dataset.

use crate::Metres;

/// The WGS 84 ellipsoid, from the ICAO
/// [WGS 84 Implementation Manual Version 2.4](https://www.icao.int/safety/pbn/Documentation/EUROCONTROL/Eurocontrol%20WGS%2084%20Implementation%20Manual.pdf)
/// Chapter 3, page 14.
pub mod wgs84 {
    use super::Metres;

    /// The WGS 84 Semimajor axis measured in metres.  
    /// This is the radius at the equator.
    pub const A: Metres = Metres(6_378_137.0);

    /// The WGS 84 flattening, a ratio.  
    /// This is the flattening of the ellipsoid at the poles.
    pub const F: f64 = 1.0 / 298.257_223_563;
}

/// The GRS 80 ellipsoid, used by the NAD83 datum.
pub mod grs80 {
    use super::Metres;

    /// The GRS 80 Semimajor axis measured in metres.
    pub const A: Metres = Metres(6_378_137.0);

    /// The GRS 80 flattening, a ratio.
    pub const F: f64 = 1.0 / 298.257_222_101;
}

/// The Clarke 1866 ellipsoid, used by the NAD27 datum.
pub mod clarke1866 {
    use super::Metres;

    /// The Clarke 1866 Semimajor axis measured in metres.
    pub const A: Metres = Metres(6_378_206.4);

    /// The Clarke 1866 flattening, a ratio.
    pub const F: f64 = 1.0 / 294.978_698_213_898;
}
