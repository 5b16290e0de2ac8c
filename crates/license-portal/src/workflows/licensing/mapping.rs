use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

/// Backend application-type codes derived from the wizard's checkboxes.
pub(crate) mod application_types {
    pub const NEW: &str = "ATID_A";
    pub const RENEWAL: &str = "ATID_B";
    pub const DUPLICATE: &str = "ATID_D";
}

static VEHICLE_CATEGORY_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static BLOOD_TYPE_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn vehicle_category_map() -> &'static HashMap<&'static str, &'static str> {
    VEHICLE_CATEGORY_MAP.get_or_init(|| {
        // Backend enumeration follows the `^VCID_[A-Z0-9]{2}$` constraint.
        const CATEGORY_TO_CODE: &[(&str, &str)] = &[
            ("A", "VCID_L4"),
            ("A1", "VCID_L5"),
            ("B", "VCID_L6"),
            ("B1", "VCID_L7"),
            ("B2", "VCID_L8"),
            ("C", "VCID_N2"),
            ("D", "VCID_M3"),
            ("BE", "VCID_O1"),
            ("CE", "VCID_O2"),
        ];

        CATEGORY_TO_CODE.iter().copied().collect()
    })
}

fn blood_type_map() -> &'static HashMap<&'static str, &'static str> {
    BLOOD_TYPE_MAP.get_or_init(|| {
        const TOKEN_TO_TYPE: &[(&str, &str)] = &[
            ("Apos", "A+"),
            ("Aneg", "A-"),
            ("Bpos", "B+"),
            ("Bneg", "B-"),
            ("ABpos", "AB+"),
            ("ABneg", "AB-"),
            ("Opos", "O+"),
            ("Oneg", "O-"),
            // Canonical values map to themselves so already-normalized
            // drafts survive a second pass.
            ("A+", "A+"),
            ("A-", "A-"),
            ("B+", "B+"),
            ("B-", "B-"),
            ("AB+", "AB+"),
            ("AB-", "AB-"),
            ("O+", "O+"),
            ("O-", "O-"),
        ];

        TOKEN_TO_TYPE.iter().copied().collect()
    })
}

/// Translate a frontend vehicle-category label into the backend code.
///
/// Unknown labels pass through unchanged with a logged warning; the backend
/// is the final arbiter and will reject codes it does not know.
pub(crate) fn backend_vehicle_category(frontend_code: &str) -> String {
    match vehicle_category_map().get(frontend_code) {
        Some(code) => (*code).to_string(),
        None => {
            warn!(
                category = frontend_code,
                "no backend mapping for vehicle category, passing through"
            );
            frontend_code.to_string()
        }
    }
}

/// Translate a stored blood-type token into the backend enumeration value.
pub(crate) fn backend_blood_type(token: &str) -> Option<&'static str> {
    blood_type_map().get(token.trim()).copied()
}
