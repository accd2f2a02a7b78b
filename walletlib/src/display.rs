//! Отображение сумм и типов операций (формат es-CL: `$25.000`).

use crate::error::{Result, WalletError};
use crate::model::TransactionKind;

/// Сумма с разделителем тысяч `.` и ведущим `$`. Отрицательные значения
/// отображаются как `$0`.
pub fn format_currency(amount: i64) -> String {
    format!("${}", group_thousands(amount.max(0).unsigned_abs()))
}

/// Сумма со знаком, выведенным из самого значения: `+$25.000`, `-$5.000`.
pub fn format_signed(amount: i64) -> String {
    let sign = if amount >= 0 { '+' } else { '-' };
    format!("{sign}${}", group_thousands(amount.unsigned_abs()))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Deposit => "Depósito",
        TransactionKind::Withdraw => "Retiro",
        TransactionKind::Purchase => "Compra",
        TransactionKind::Receive => "Transferencia recibida",
        TransactionKind::Send => "Transferencia enviada",
    }
}

/// Разбор суммы из пользовательского ввода: `25000`, `25.000`, `$25.000`.
/// Ноль и всё нечисловое дают `InvalidAmount`.
pub fn parse_amount(input: &str) -> Result<i64> {
    let raw = input.trim();
    let body = raw.strip_prefix('$').unwrap_or(raw).trim();
    if body.is_empty() {
        return Err(WalletError::InvalidAmount(format!("`{input}` is empty")));
    }
    let grouped = body.contains('.');
    let well_formed = body.split('.').enumerate().all(|(i, part)| {
        let len_ok = match i {
            0 if grouped => (1..=3).contains(&part.len()),
            0 => true,
            _ => part.len() == 3,
        };
        len_ok && part.chars().all(|c| c.is_ascii_digit())
    });
    if !well_formed {
        return Err(WalletError::InvalidAmount(format!("`{input}` is not a whole amount")));
    }
    let digits: String = body.chars().filter(|c| *c != '.').collect();
    let value: i64 = digits
        .parse()
        .map_err(|_| WalletError::InvalidAmount(format!("`{input}` is out of range")))?;
    if value <= 0 {
        return Err(WalletError::InvalidAmount(format!("`{input}` must be positive")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_periods() {
        assert_eq!(format_currency(25_000), "$25.000");
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(1_000), "$1.000");
        assert_eq!(format_currency(60_000), "$60.000");
        assert_eq!(format_currency(1_234_567), "$1.234.567");
    }

    #[test]
    fn negative_currency_clamps_to_zero() {
        assert_eq!(format_currency(-5_000), "$0");
    }

    #[test]
    fn signed_display_follows_stored_sign() {
        assert_eq!(format_signed(25_000), "+$25.000");
        assert_eq!(format_signed(-5_000), "-$5.000");
        assert_eq!(format_signed(i64::MIN), "-$9.223.372.036.854.775.808");
    }

    #[test]
    fn parses_plain_and_grouped_amounts() {
        assert_eq!(parse_amount("25000").unwrap(), 25_000);
        assert_eq!(parse_amount("25.000").unwrap(), 25_000);
        assert_eq!(parse_amount(" $1.234.567 ").unwrap(), 1_234_567);
    }

    #[test]
    fn rejects_bad_amounts() {
        for bad in ["", "$", "0", "-5", "abc", "12,5", "1.23", "25.0000", "1..000"] {
            assert!(
                matches!(parse_amount(bad), Err(WalletError::InvalidAmount(_))),
                "{bad} should be rejected"
            );
        }
    }
}
