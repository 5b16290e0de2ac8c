use tracing::warn;

use super::mapping;

pub(crate) const DEFAULT_BLOOD_TYPE: &str = "O+";

/// Normalize a contact number into the backend's `+63XXXXXXXXXX` format.
///
/// Local numbers starting with `0` lose the trunk prefix; bare ten-digit
/// mobile numbers starting with `9` gain the country code. Anything else
/// passes through unchanged and is left to backend validation.
pub(crate) fn normalize_contact_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.is_empty() {
        if let Some(rest) = trimmed.strip_prefix('0') {
            return format!("+63{rest}");
        }
        if trimmed.len() == 10 && trimmed.starts_with('9') {
            return format!("+63{trimmed}");
        }
    }
    trimmed.to_string()
}

/// Normalize a stored blood-type token, defaulting to `O+` only when the
/// draft holds no value at all.
///
/// Unknown tokens pass through unchanged with a logged warning; rewriting a
/// present value would fabricate medical data the backend should reject
/// itself.
pub(crate) fn normalize_blood_type(token: Option<&str>) -> String {
    match token {
        Some(raw) => match mapping::backend_blood_type(raw) {
            Some(canonical) => canonical.to_string(),
            None => {
                warn!(token = raw, "no canonical form for blood type, passing through");
                raw.trim().to_string()
            }
        },
        None => DEFAULT_BLOOD_TYPE.to_string(),
    }
}

/// Fix the two educational-attainment synonyms the wizard historically
/// emitted before the dropdown options were aligned with the backend enum.
pub(crate) fn normalize_educational_attainment(value: &str) -> String {
    match value.trim() {
        "Post Graduate" => "Postgraduate".to_string(),
        "Highschool" => "High School".to_string(),
        other => other.to_string(),
    }
}

/// Join address components with `", "`, skipping empty parts.
pub(crate) fn compose_address<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_number_gains_country_code() {
        assert_eq!(normalize_contact_number("09171234567"), "+639171234567");
        assert_eq!(normalize_contact_number("9171234567"), "+639171234567");
    }

    #[test]
    fn international_format_passes_through() {
        assert_eq!(normalize_contact_number("+639171234567"), "+639171234567");
    }

    #[test]
    fn landline_style_numbers_pass_through() {
        assert_eq!(normalize_contact_number("28881234"), "28881234");
    }

    #[test]
    fn blood_type_defaults_only_when_absent() {
        assert_eq!(normalize_blood_type(Some("Apos")), "A+");
        assert_eq!(normalize_blood_type(None), "O+");
    }

    #[test]
    fn unknown_blood_token_passes_through() {
        assert_eq!(normalize_blood_type(Some("X+unknown")), "X+unknown");
        assert_eq!(normalize_blood_type(Some(" ??? ")), "???");
    }

    #[test]
    fn education_synonyms_are_fixed() {
        assert_eq!(
            normalize_educational_attainment("Post Graduate"),
            "Postgraduate"
        );
        assert_eq!(normalize_educational_attainment("Highschool"), "High School");
        assert_eq!(normalize_educational_attainment("College"), "College");
    }

    #[test]
    fn address_skips_empty_parts() {
        let address = compose_address(["12", "", "Mabini St", " ", "Quezon City"]);
        assert_eq!(address, "12, Mabini St, Quezon City");
    }
}
