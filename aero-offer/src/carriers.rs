/// Display names for the carriers the search UI knows about
const CARRIERS: &[(&str, &str)] = &[
    ("TK", "Turkish Airlines"),
    ("AF", "Air France"),
    ("DL", "Delta Air Lines"),
    ("LH", "Lufthansa"),
    ("BA", "British Airways"),
    ("EK", "Emirates"),
    ("QR", "Qatar Airways"),
];

/// Airline name for an IATA carrier code, or the code itself when unknown.
pub fn carrier_name(code: &str) -> String {
    CARRIERS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_carriers() {
        assert_eq!(carrier_name("TK"), "Turkish Airlines");
        assert_eq!(carrier_name("ek"), "Emirates");
        assert_eq!(carrier_name("ZZ"), "ZZ");
    }
}
