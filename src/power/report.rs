//! Human-readable result lines shared by every front end

use super::Powers;

pub const TITLE: &str = "Power Calculator";

pub const PROMPT: &str = "Enter a number to calculate its square, cube, and fifth power";

pub const INPUT_LABEL: &str = "Enter an integer";

pub fn square_line(p: &Powers) -> String {
    format!("The square of {} is: {}", p.value, p.square)
}

pub fn cube_line(p: &Powers) -> String {
    format!("The cube of {} is: {}", p.value, p.cube)
}

pub fn fifth_line(p: &Powers) -> String {
    format!("The fifth power of {} is: {}", p.value, p.fifth)
}

/// The three result lines in display order
pub fn lines(p: &Powers) -> [String; 3] {
    [square_line(p), cube_line(p), fifth_line(p)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::Number;

    #[test]
    fn test_integer_lines() {
        let powers = Powers::compute(Number::Integer(3)).unwrap();
        assert_eq!(
            lines(&powers),
            [
                "The square of 3 is: 9".to_string(),
                "The cube of 3 is: 27".to_string(),
                "The fifth power of 3 is: 243".to_string(),
            ]
        );
    }

    #[test]
    fn test_float_lines_keep_fraction() {
        let powers = Powers::compute(Number::Float(2.0)).unwrap();
        assert_eq!(square_line(&powers), "The square of 2.0 is: 4.0");
        assert_eq!(fifth_line(&powers), "The fifth power of 2.0 is: 32.0");
    }

    #[test]
    fn test_large_float_has_no_exponent() {
        let powers = Powers::compute(Number::Float(1e8)).unwrap();
        assert_eq!(
            square_line(&powers),
            "The square of 100000000.0 is: 10000000000000000.0"
        );
    }

    #[test]
    fn test_small_float_has_no_exponent() {
        let powers = Powers::compute(Number::Float(0.001)).unwrap();
        let line = fifth_line(&powers);
        assert!(line.starts_with("The fifth power of 0.001 is: 0.0000000000000"), "{line}");
        let value = line.rsplit(": ").next().unwrap();
        assert!(!value.contains('e'), "{line}");
    }

    #[test]
    fn test_negative_value() {
        let powers = Powers::compute(Number::Integer(-2)).unwrap();
        assert_eq!(cube_line(&powers), "The cube of -2 is: -8");
    }
}
