//! Plain-text ticket builder
//!
//! Provides a fluent API for composing fixed-width receipt text.

/// Plain-text ticket builder
///
/// Composes receipt lines at a fixed character width. Output is plain
/// UTF-8 text suitable for file download or piping to a line printer.
pub struct TicketBuilder {
    buf: String,
    width: usize,
}

impl TicketBuilder {
    /// Create a new builder with the specified width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::with_capacity(1024),
            width,
        }
    }

    /// Get the configured width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Write an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Write text centered within the configured width
    pub fn center(&mut self, s: &str) -> &mut Self {
        let len = s.chars().count();
        if len >= self.width {
            return self.line(s);
        }
        let pad = (self.width - len) / 2;
        for _ in 0..pad {
            self.buf.push(' ');
        }
        self.line(s)
    }

    /// Write a left column and a right-aligned column on one line
    ///
    /// If the two columns do not fit, the right column wins and the left
    /// column is truncated with no ellipsis.
    pub fn columns(&mut self, left: &str, right: &str) -> &mut Self {
        let right_len = right.chars().count();
        if right_len + 1 >= self.width {
            return self.line(right);
        }
        let max_left = self.width - right_len - 1;
        let left: String = left.chars().take(max_left).collect();
        let gap = self.width - left.chars().count() - right_len;
        self.buf.push_str(&left);
        for _ in 0..gap {
            self.buf.push(' ');
        }
        self.line(right)
    }

    // === Separators ===

    /// Single separator line (dashes)
    pub fn sep(&mut self) -> &mut Self {
        let s: String = "-".repeat(self.width);
        self.line(&s)
    }

    /// Double separator line (equals signs)
    pub fn sep_double(&mut self) -> &mut Self {
        let s: String = "=".repeat(self.width);
        self.line(&s)
    }

    // === Output ===

    /// Consume the builder and return the composed text
    pub fn build(self) -> String {
        self.buf
    }
}

impl Default for TicketBuilder {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Format a monetary amount held in minor units with thousands separators
///
/// `format_minor(36000)` → `"36,000"`. Negative amounts keep their sign.
pub fn format_minor(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pads_to_width() {
        let mut b = TicketBuilder::new(10);
        b.center("abcd");
        assert_eq!(b.build(), "   abcd\n");
    }

    #[test]
    fn test_columns_right_aligned() {
        let mut b = TicketBuilder::new(16);
        b.columns("Tea x2", "16,000");
        let text = b.build();
        assert_eq!(text.len(), 17); // 16 chars + newline
        assert!(text.starts_with("Tea x2"));
        assert!(text.ends_with("16,000\n"));
    }

    #[test]
    fn test_columns_truncates_left_when_tight() {
        let mut b = TicketBuilder::new(12);
        b.columns("A very long item name", "9,999");
        let text = b.build();
        assert_eq!(text.trim_end().chars().count(), 12);
        assert!(text.ends_with("9,999\n"));
    }

    #[test]
    fn test_separators_match_width() {
        let mut b = TicketBuilder::new(8);
        b.sep().sep_double();
        assert_eq!(b.build(), "--------\n========\n");
    }

    #[test]
    fn test_format_minor() {
        assert_eq!(format_minor(0), "0");
        assert_eq!(format_minor(950), "950");
        assert_eq!(format_minor(8000), "8,000");
        assert_eq!(format_minor(36000), "36,000");
        assert_eq!(format_minor(1234567), "1,234,567");
        assert_eq!(format_minor(-8000), "-8,000");
    }
}
