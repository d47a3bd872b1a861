//! Fixed-width text rendering of a receipt
//!
//! Turns a persisted receipt and its ordered line items into the printable
//! document a fiscal printer would produce. The output is deterministic
//! byte-for-byte for identical inputs.
//!
//! Layout, top to bottom:
//!
//! ```text
//!           ФОП Джонсонюк Борис
//! ========================================
//! 3 x 298 870.00                896 610.00
//! Mavic 3T
//! ========================================
//! SUM                         1 516 610.00
//! Готівка                     1 516 610.00
//! Change                              0.00
//! ========================================
//!            01.03.2024 12:30
//!           Дякуємо за покупку!
//! ```
//!
//! Every line is padded to exactly the configured line length. Widths are
//! counted in characters, not bytes, so Cyrillic names line up correctly.

use serde::Deserialize;

use crate::error::ReceiptError;
use crate::receipt::{Receipt, ReceiptLine};

/// Smallest usable line length: the widest mandatory label plus a minimal
/// amount must fit with at least one space between them.
pub const MIN_LINE_LENGTH: usize = 20;

/// Default line length of a 58mm receipt printer
pub const DEFAULT_LINE_LENGTH: usize = 40;

const SEPARATOR: &str = "=";
const SUM_LABEL: &str = "SUM";
const CHANGE_LABEL: &str = "Change";
const THANK_YOU_LINE: &str = "Дякуємо за покупку!";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Rendering settings for the text document
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    /// Shop or operator name printed in the header
    pub shop_name: String,
    /// Target width of every rendered line, in characters
    pub line_length: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shop_name: "ФОП Джонсонюк Борис".to_string(),
            line_length: DEFAULT_LINE_LENGTH,
        }
    }
}

impl RenderOptions {
    /// Replaces the line length, keeping the configured shop name
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }
}

/// Renders a receipt and its ordered line items as a printable document
///
/// Lines are joined with a single newline and no trailing newline.
///
/// # Errors
///
/// Returns `ReceiptError::Validation` if `options.line_length` is below
/// [`MIN_LINE_LENGTH`].
pub fn render_receipt(
    receipt: &Receipt,
    lines: &[ReceiptLine],
    options: &RenderOptions,
) -> Result<String, ReceiptError> {
    let width = options.line_length;
    if width < MIN_LINE_LENGTH {
        return Err(ReceiptError::validation(format!(
            "line length must be at least {MIN_LINE_LENGTH}, got {width}"
        )));
    }

    let separator = SEPARATOR.repeat(width);
    let mut out: Vec<String> = Vec::with_capacity(lines.len() * 2 + 8);

    out.push(center(&options.shop_name, width));
    out.push(separator.clone());

    for line in lines {
        let left = format!("{} x {}", line.quantity, line.unit_price.format_grouped());
        out.push(spread(&left, &line.subtotal.format_grouped(), width));
        out.push(left_justify(&line.name, width));
    }

    out.push(separator.clone());
    out.push(spread(SUM_LABEL, &receipt.total.format_grouped(), width));
    out.push(spread(
        receipt.payment_kind.receipt_label(),
        &receipt.payment_amount.format_grouped(),
        width,
    ));
    out.push(spread(CHANGE_LABEL, &receipt.rest.format_grouped(), width));
    out.push(separator);
    out.push(center(
        &receipt.created_at.format(TIMESTAMP_FORMAT).to_string(),
        width,
    ));
    out.push(center(THANK_YOU_LINE, width));

    Ok(out.join("\n"))
}

/// Centers text within `width`; when padding is uneven the extra space goes
/// on the right
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2;
    let right = pad - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Left and right fragments separated by spaces so the line fills `width`
///
/// Overlong fragments degrade to a single separating space rather than
/// truncating monetary values.
fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = if used >= width { 1 } else { width - used };
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Left-justified text padded with spaces to `width`
fn left_justify(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - len))
}
