//! Static currency reference data

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CurrencyKind {
    Fiat,
    Crypto,
}

/// Identity record for a currency. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
    pub kind: CurrencyKind,
}

const fn fiat(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    flag: &'static str,
) -> Currency {
    Currency {
        code,
        name,
        symbol,
        flag,
        kind: CurrencyKind::Fiat,
    }
}

const fn crypto(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    flag: &'static str,
) -> Currency {
    Currency {
        code,
        name,
        symbol,
        flag,
        kind: CurrencyKind::Crypto,
    }
}

pub const CURRENCIES: &[Currency] = &[
    fiat("USD", "US Dollar", "$", "🇺🇸"),
    fiat("EUR", "Euro", "€", "🇪🇺"),
    fiat("GBP", "British Pound", "£", "🇬🇧"),
    fiat("BRL", "Brazilian Real", "R$", "🇧🇷"),
    fiat("JPY", "Japanese Yen", "¥", "🇯🇵"),
    fiat("CAD", "Canadian Dollar", "C$", "🇨🇦"),
    fiat("AUD", "Australian Dollar", "A$", "🇦🇺"),
    fiat("CHF", "Swiss Franc", "CHF", "🇨🇭"),
    fiat("CNY", "Chinese Yuan", "¥", "🇨🇳"),
    fiat("INR", "Indian Rupee", "₹", "🇮🇳"),
    fiat("KRW", "South Korean Won", "₩", "🇰🇷"),
    fiat("MXN", "Mexican Peso", "$", "🇲🇽"),
    fiat("SGD", "Singapore Dollar", "S$", "🇸🇬"),
    fiat("NZD", "New Zealand Dollar", "NZ$", "🇳🇿"),
    fiat("SEK", "Swedish Krona", "kr", "🇸🇪"),
    fiat("NOK", "Norwegian Krone", "kr", "🇳🇴"),
    fiat("RUB", "Russian Ruble", "₽", "🇷🇺"),
    fiat("ZAR", "South African Rand", "R", "🇿🇦"),
    fiat("TRY", "Turkish Lira", "₺", "🇹🇷"),
    fiat("PLN", "Polish Zloty", "zł", "🇵🇱"),
    crypto("BTC", "Bitcoin", "₿", "₿"),
    crypto("ETH", "Ethereum", "Ξ", "Ξ"),
    crypto("LTC", "Litecoin", "Ł", "Ł"),
    crypto("XRP", "XRP", "XRP", "◉"),
    crypto("ADA", "Cardano", "ADA", "₳"),
];

/// Looks up a currency by code, ignoring case.
pub fn find(code: &str) -> Option<&'static Currency> {
    CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Returns the catalogue with favorites first, each group keeping catalogue order.
pub fn sorted_by_favorites(favorites: &[String]) -> Vec<&'static Currency> {
    let is_favorite = |c: &Currency| favorites.iter().any(|f| f.eq_ignore_ascii_case(c.code));
    let (mut first, rest): (Vec<_>, Vec<_>) = CURRENCIES.iter().partition(|&c| is_favorite(c));
    first.extend(rest);
    first
}
