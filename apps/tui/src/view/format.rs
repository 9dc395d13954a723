/// `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Rounds half away from zero before grouping, so `2.5` becomes `"3"`.
pub fn group_rounded(value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 {
        format!("-{}", group_thousands((-rounded) as u64))
    } else {
        group_thousands(rounded as u64)
    }
}

pub fn currency(value: f64) -> String {
    format!("${}", fixed(value, 2))
}

/// Rounds half away from zero at `decimals` places. Plain `{:.2}` formats the
/// binary value exactly, which turns `12.345` into `"12.34"`.
pub fn fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let rounded = (scaled + scaled.signum() * 1e-9).round() / factor;
    format!("{rounded:.decimals$}")
}

/// Axis tick for counts: `12500` -> `"13k"`, `950` -> `"950"`.
pub fn abbreviate_count(value: f64) -> String {
    if value >= 1000.0 {
        format!("{}k", (value / 1000.0).round())
    } else {
        trim_float(value)
    }
}

pub fn dollar_tick(value: f64) -> String {
    format!("${}", trim_float(value))
}

/// Drops trailing zeros: `12.50` -> `"12.5"`, `3.0` -> `"3"`.
pub fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
