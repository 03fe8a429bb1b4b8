/// One tick mark. Minor ticks carry no label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: Option<String>,
}

/// A frame axis with fixed limits and the ticks that fall inside them.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    pub title: String,
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn new(min: f64, max: f64, log: bool, title: &str) -> Self {
        let (min, max) = sane_limits(min, max, log);
        let ticks = if log {
            log_ticks(min, max)
        } else {
            linear_ticks(min, max, 6)
        };
        Axis {
            min,
            max,
            log,
            title: title.to_owned(),
            ticks,
        }
    }

    /// Maps a data value onto `[px_min, px_max]`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let v = value.max(f64::MIN_POSITIVE).log10();
            (v - self.min.log10()) / (self.max.log10() - self.min.log10())
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// A log axis needs strictly positive limits and every axis a non-empty range.
fn sane_limits(min: f64, max: f64, log: bool) -> (f64, f64) {
    let (mut min, mut max) = (min, max);
    if log {
        if max <= 0.0 {
            max = 1.0;
        }
        if min <= 0.0 {
            min = max * 1e-5;
        }
    }
    if max <= min {
        if log {
            (min / 10.0, min * 10.0)
        } else {
            (min - 1.0, min + 1.0)
        }
    } else {
        (min, max)
    }
}

fn log_ticks(min: f64, max: f64) -> Vec<Tick> {
    let first = min.log10().floor() as i32;
    let last = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for exp in first..=last {
        let decade = 10f64.powi(exp);
        for m in 1..=9 {
            let value = m as f64 * decade;
            if value < min * (1.0 - 1e-9) || value > max * (1.0 + 1e-9) {
                continue;
            }
            ticks.push(Tick {
                value,
                label: (m == 1).then(|| format!("10{}", superscript(exp))),
            });
        }
    }
    ticks
}

fn linear_ticks(min: f64, max: f64, target: usize) -> Vec<Tick> {
    let step = nice_step((max - min) / (target.max(2) - 1) as f64);
    let start = (min / step - 1e-9).ceil() as i64;
    let end = (max / step + 1e-9).floor() as i64;

    (start..=end)
        .map(|k| {
            let value = k as f64 * step;
            Tick {
                value,
                label: Some(format_tick(value, step)),
            }
        })
        .collect()
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10f64.powf(exp);
    let nice = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice * 10f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    // avoid "-0"
    let value = if value.abs() < step * 1e-6 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            c => c,
        })
        .collect()
}
