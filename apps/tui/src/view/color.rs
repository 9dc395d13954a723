use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Mixes `self` over `background` with the given opacity in [0, 1].
    pub fn over(self, background: Self, opacity: f64) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            (f64::from(fg) * opacity + f64::from(bg) * (1.0 - opacity)).round() as u8
        };
        Self(
            mix(self.0, background.0),
            mix(self.1, background.1),
            mix(self.2, background.2),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

pub const CHART_COLORS: [Rgb; 12] = [
    Rgb(0x6c, 0x63, 0xff),
    Rgb(0x00, 0xc9, 0xa7),
    Rgb(0xff, 0x6b, 0x6b),
    Rgb(0xff, 0xd9, 0x3d),
    Rgb(0x45, 0xb7, 0xd1),
    Rgb(0x96, 0xce, 0xb4),
    Rgb(0xff, 0x9f, 0xf3),
    Rgb(0xf8, 0xb5, 0x00),
    Rgb(0x2e, 0xcc, 0x71),
    Rgb(0xe7, 0x4c, 0x3c),
    Rgb(0x34, 0x98, 0xdb),
    Rgb(0x9b, 0x59, 0xb6),
];

pub const fn palette_color(index: usize) -> Rgb {
    CHART_COLORS[index % CHART_COLORS.len()]
}

pub const HOUR_BASE: Rgb = Rgb(0x6c, 0x63, 0xff);
pub const HOUR_RUSH: Rgb = Rgb(0xff, 0x6b, 0x6b);
pub const DAY_BASE: Rgb = Rgb(0x00, 0xc9, 0xa7);
pub const DAY_WEEKEND: Rgb = Rgb(0xff, 0xd9, 0x3d);
pub const SCATTER_POINT: Rgb = Rgb(0x6c, 0x63, 0xff);

/// Choropleth ramp, from empty through increasing intensity.
pub const RAMP_STOPS: [Rgb; 5] = [
    Rgb(26, 29, 39),
    Rgb(108, 99, 255),
    Rgb(0, 201, 167),
    Rgb(255, 217, 61),
    Rgb(255, 107, 107),
];

/// Position of `value` along the ramp, in [0, stops - 1].
pub fn ramp_position(value: f64, max: f64) -> f64 {
    let ratio = if max > 0.0 && value.is_finite() {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ratio * (RAMP_STOPS.len() - 1) as f64
}

/// Five-stop linear interpolation of `value / max`.
pub fn interpolate(value: f64, max: f64) -> Rgb {
    let segment = ramp_position(value, max);
    let index = (segment.floor() as usize).min(RAMP_STOPS.len() - 2);
    let t = segment - index as f64;
    let (from, to) = (RAMP_STOPS[index], RAMP_STOPS[index + 1]);
    let channel = |a: u8, b: u8| t.mul_add(f64::from(b) - f64::from(a), f64::from(a)).round() as u8;

    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Global colors shared by every chart, applied once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTheme {
    pub text: Rgb,
    pub border: Rgb,
    pub background: Rgb,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            text: Rgb(0x64, 0x74, 0x8b),
            border: Rgb(0xe5, 0xe7, 0xeb),
            background: RAMP_STOPS[0],
        }
    }
}
