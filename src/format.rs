use rust_decimal::Decimal;

pub fn format_amount(currency: char, amount: Decimal) -> String {
    format!("{:.2}{}", amount, currency)
}

pub fn format_percent(sweep_angle: f64) -> String {
    format!("{:.1}%", sweep_angle / 360.0 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_render_with_two_decimals() {
        assert_eq!(format_amount('$', "7.5".parse().unwrap()), "7.50$");
    }

    #[test]
    fn percentages_come_from_sweep_angles() {
        assert_eq!(format_percent(90.0), "25.0%");
    }
}
