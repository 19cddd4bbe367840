use crate::mortgage::AmortizationResult;

pub const CHART_TITLE: &str = "Principal vs Interest Payments Over Time";
pub const PRINCIPAL_SERIES: &str = "Principal Paid";
pub const INTEREST_SERIES: &str = "Interest Paid";

const BAR_GLYPHS: [char; 4] = ['#', '=', '*', '+'];

/// Formats an amount the way a US currency formatter does: `$1,234.56`,
/// `-$5.00` for negatives. Anything that rounds to zero cents prints as
/// `$0.00`, so float residue on a paid-off balance never shows as `-$0.00`.
/// Non-finite amounts print as `$inf`, `-$inf` and `NaN`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let Some((whole, cents)) = fixed.split_once('.') else {
        // only infinity formats without a decimal point
        let sign = if amount < 0. { "-" } else { "" };
        return format!("{}${}", sign, fixed);
    };
    let sign = if amount < 0. && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Text panel contents: one line per month, then the total cost line.
pub fn render_text(result: Option<&AmortizationResult>) -> String {
    let Some(result) = result else {
        return String::new();
    };

    let mut text = String::new();
    for entry in &result.schedule {
        text.push_str(&entry.to_string());
        text.push('\n');
    }
    text.push_str(&format!(
        "Total Cost of Loan = {}\n",
        format_currency(result.total_cost)
    ));
    text
}

#[derive(Clone, PartialEq, Debug)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Grouped bar chart: every series has one value per category.
#[derive(Clone, PartialEq, Debug)]
pub struct ChartModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartModel {
    pub fn from_result(result: &AmortizationResult) -> Self {
        let schedule = &result.schedule;
        Self {
            title: CHART_TITLE.to_string(),
            x_label: "Month".to_string(),
            y_label: "Amount".to_string(),
            categories: schedule.iter().map(|e| e.month.to_string()).collect(),
            series: vec![
                ChartSeries {
                    name: PRINCIPAL_SERIES.to_string(),
                    values: schedule.iter().map(|e| e.principal_paid).collect(),
                },
                ChartSeries {
                    name: INTEREST_SERIES.to_string(),
                    values: schedule.iter().map(|e| e.interest_paid).collect(),
                },
            ],
        }
    }

    fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0., f64::max)
    }

    /// Draws horizontal bars, one row per series within each category,
    /// scaled so the largest value spans `width` characters.
    pub fn draw(&self, width: usize) -> String {
        let max = self.max_value();
        let label_w = self
            .categories
            .iter()
            .map(String::len)
            .chain(std::iter::once(self.x_label.len()))
            .max()
            .unwrap_or(0);

        let legend: Vec<String> = self
            .series
            .iter()
            .zip(BAR_GLYPHS.iter().cycle())
            .map(|(s, glyph)| format!("{} {}", glyph, s.name))
            .collect();

        let mut out = format!("{}\n", self.title);
        out.push_str(&format!(
            "{:>label_w$} {} ({})\n",
            self.x_label,
            legend.join(", "),
            self.y_label
        ));

        for (idx, category) in self.categories.iter().enumerate() {
            let rows = self.series.iter().zip(BAR_GLYPHS.iter().cycle());
            for (n, (series, glyph)) in rows.enumerate() {
                let value = series.values.get(idx).copied().unwrap_or(0.);
                let len = if max > 0. {
                    ((value.max(0.) / max) * width as f64).round() as usize
                } else {
                    0
                };
                let label = if n == 0 { category.as_str() } else { "" };
                let bar: String = std::iter::repeat(*glyph).take(len.min(width)).collect();
                out.push_str(&format!(
                    "{:>label_w$} {:<width$} {}\n",
                    label,
                    bar,
                    format_currency(value)
                ));
            }
        }
        out
    }
}

/// Chart panel contents; `None` means the panel is empty.
pub fn render_chart(result: Option<&AmortizationResult>) -> Option<ChartModel> {
    result.map(ChartModel::from_result)
}
