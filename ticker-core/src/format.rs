use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::FormatError;

/// Валюта ISO 4217: символ в en-US (или сам код) и число знаков после точки
struct Currency {
    code: &'static str,
    symbol: &'static str,
    digits: u32,
}

const fn cur(code: &'static str, symbol: &'static str, digits: u32) -> Currency {
    Currency {
        code,
        symbol,
        digits,
    }
}

#[rustfmt::skip]
static CURRENCIES: &[Currency] = &[
    cur("AED", "AED", 2), cur("AFN", "AFN", 2), cur("ALL", "ALL", 2), cur("AMD", "AMD", 2),
    cur("ANG", "ANG", 2), cur("AOA", "AOA", 2), cur("ARS", "ARS", 2), cur("AUD", "A$", 2),
    cur("AWG", "AWG", 2), cur("AZN", "AZN", 2), cur("BAM", "BAM", 2), cur("BBD", "BBD", 2),
    cur("BDT", "BDT", 2), cur("BGN", "BGN", 2), cur("BHD", "BHD", 3), cur("BIF", "BIF", 0),
    cur("BMD", "BMD", 2), cur("BND", "BND", 2), cur("BOB", "BOB", 2), cur("BRL", "R$", 2),
    cur("BSD", "BSD", 2), cur("BTN", "BTN", 2), cur("BWP", "BWP", 2), cur("BYN", "BYN", 2),
    cur("BZD", "BZD", 2), cur("CAD", "CA$", 2), cur("CDF", "CDF", 2), cur("CHF", "CHF", 2),
    cur("CLF", "CLF", 4), cur("CLP", "CLP", 0), cur("CNY", "CN¥", 2), cur("COP", "COP", 2),
    cur("CRC", "CRC", 2), cur("CUP", "CUP", 2), cur("CVE", "CVE", 2), cur("CZK", "CZK", 2),
    cur("DJF", "DJF", 0), cur("DKK", "DKK", 2), cur("DOP", "DOP", 2), cur("DZD", "DZD", 2),
    cur("EGP", "EGP", 2), cur("ERN", "ERN", 2), cur("ETB", "ETB", 2), cur("EUR", "€", 2),
    cur("FJD", "FJD", 2), cur("FKP", "FKP", 2), cur("GBP", "£", 2), cur("GEL", "GEL", 2),
    cur("GHS", "GHS", 2), cur("GIP", "GIP", 2), cur("GMD", "GMD", 2), cur("GNF", "GNF", 0),
    cur("GTQ", "GTQ", 2), cur("GYD", "GYD", 2), cur("HKD", "HK$", 2), cur("HNL", "HNL", 2),
    cur("HTG", "HTG", 2), cur("HUF", "HUF", 2), cur("IDR", "IDR", 2), cur("ILS", "₪", 2),
    cur("INR", "₹", 2), cur("IQD", "IQD", 3), cur("IRR", "IRR", 2), cur("ISK", "ISK", 0),
    cur("JMD", "JMD", 2), cur("JOD", "JOD", 3), cur("JPY", "¥", 0), cur("KES", "KES", 2),
    cur("KGS", "KGS", 2), cur("KHR", "KHR", 2), cur("KMF", "KMF", 0), cur("KPW", "KPW", 2),
    cur("KRW", "₩", 0), cur("KWD", "KWD", 3), cur("KYD", "KYD", 2), cur("KZT", "KZT", 2),
    cur("LAK", "LAK", 2), cur("LBP", "LBP", 2), cur("LKR", "LKR", 2), cur("LRD", "LRD", 2),
    cur("LSL", "LSL", 2), cur("LYD", "LYD", 3), cur("MAD", "MAD", 2), cur("MDL", "MDL", 2),
    cur("MGA", "MGA", 2), cur("MKD", "MKD", 2), cur("MMK", "MMK", 2), cur("MNT", "MNT", 2),
    cur("MOP", "MOP", 2), cur("MRU", "MRU", 2), cur("MUR", "MUR", 2), cur("MVR", "MVR", 2),
    cur("MWK", "MWK", 2), cur("MXN", "MX$", 2), cur("MYR", "MYR", 2), cur("MZN", "MZN", 2),
    cur("NAD", "NAD", 2), cur("NGN", "NGN", 2), cur("NIO", "NIO", 2), cur("NOK", "NOK", 2),
    cur("NPR", "NPR", 2), cur("NZD", "NZ$", 2), cur("OMR", "OMR", 3), cur("PAB", "PAB", 2),
    cur("PEN", "PEN", 2), cur("PGK", "PGK", 2), cur("PHP", "₱", 2), cur("PKR", "PKR", 2),
    cur("PLN", "PLN", 2), cur("PYG", "PYG", 0), cur("QAR", "QAR", 2), cur("RON", "RON", 2),
    cur("RSD", "RSD", 2), cur("RUB", "RUB", 2), cur("RWF", "RWF", 0), cur("SAR", "SAR", 2),
    cur("SBD", "SBD", 2), cur("SCR", "SCR", 2), cur("SDG", "SDG", 2), cur("SEK", "SEK", 2),
    cur("SGD", "SGD", 2), cur("SHP", "SHP", 2), cur("SLE", "SLE", 2), cur("SOS", "SOS", 2),
    cur("SRD", "SRD", 2), cur("SSP", "SSP", 2), cur("STN", "STN", 2), cur("SYP", "SYP", 2),
    cur("SZL", "SZL", 2), cur("THB", "THB", 2), cur("TJS", "TJS", 2), cur("TMT", "TMT", 2),
    cur("TND", "TND", 3), cur("TOP", "TOP", 2), cur("TRY", "TRY", 2), cur("TTD", "TTD", 2),
    cur("TWD", "NT$", 2), cur("TZS", "TZS", 2), cur("UAH", "UAH", 2), cur("UGX", "UGX", 0),
    cur("USD", "$", 2), cur("UYU", "UYU", 2), cur("UZS", "UZS", 2), cur("VES", "VES", 2),
    cur("VND", "₫", 0), cur("VUV", "VUV", 0), cur("WST", "WST", 2), cur("XAF", "FCFA", 0),
    cur("XAG", "XAG", 2), cur("XAU", "XAU", 2), cur("XCD", "EC$", 2), cur("XDR", "XDR", 2),
    cur("XOF", "F\u{202f}CFA", 0), cur("XPD", "XPD", 2), cur("XPF", "CFPF", 0), cur("XPT", "XPT", 2),
    cur("YER", "YER", 2), cur("ZAR", "ZAR", 2), cur("ZMW", "ZMW", 2), cur("ZWL", "ZWL", 2),
];

fn lookup(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// Цена в валюте `quote` в локали en-US: "$67,956.00", "¥1,235", "-€0.50".
pub fn format_value(quote: &str, amount: Decimal) -> Result<String, FormatError> {
    let currency = lookup(quote).ok_or_else(|| FormatError::UnknownCurrency(quote.to_string()))?;

    let (negative, digits) = render(amount, currency.digits);
    let sign = if negative { "-" } else { "" };
    Ok(format!("{sign}{}{digits}", currency.symbol))
}

/// Доля -> проценты с двумя знаками: -0.00755042 -> "-0.76%"
pub fn format_as_percentage(fraction: Decimal) -> String {
    let (negative, digits) = render(fraction * Decimal::ONE_HUNDRED, 2);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{digits}%")
}

/// Округление half-even до `dp` знаков и группировка тысяч.
/// Возвращает (знак минус, модуль числа строкой).
///
/// Знак берётся с исходного значения, поэтому отрицательное число,
/// округлённое до нуля, остаётся со знаком: -0.00001 -> "-0.00".
fn render(value: Decimal, dp: u32) -> (bool, String) {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    // после round_dp масштаб <= dp, rescale только дописывает нули
    rounded.rescale(dp);

    let negative = value.is_sign_negative() && !value.is_zero();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = group_thousands(int_part);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }

    (negative, out)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
