//! Static reference data mirrored from the backend's public enumerations:
//! display names for opaque backend codes plus the option lists the wizard's
//! dropdowns are built from.

/// Human-facing name for an application-type code.
pub fn application_type_display_name(type_id: &str) -> &str {
    match type_id {
        "ATID_A" => "New License",
        "ATID_B" => "License Renewal",
        "ATID_D" => "Duplicate License",
        other => other,
    }
}

/// Human-facing name for an application-status code.
pub fn application_status_display_name(status_id: &str) -> &str {
    match status_id {
        "ASID_PEN" => "Pending",
        "ASID_SFA" => "Subject for Approval",
        "ASID_APR" => "Approved",
        "ASID_REJ" => "Rejected",
        "ASID_RSB" => "Resubmission Required",
        other => other,
    }
}

/// Human-facing name for a frontend vehicle-category label.
pub fn vehicle_category_display_name(category: &str) -> &str {
    match category {
        "A" => "Motorcycle",
        "A1" => "Tricycle",
        "B" => "Passenger Car",
        "B1" => "Van",
        "B2" => "Light Truck",
        "C" => "Heavy Truck",
        "D" => "Bus",
        "BE" => "Car with Trailer",
        "CE" => "Truck with Trailer",
        other => other,
    }
}

pub const BLOOD_TYPE_OPTIONS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub const CIVIL_STATUS_OPTIONS: &[&str] =
    &["Single", "Married", "Divorced", "Widowed", "Separated"];

pub const EDUCATIONAL_ATTAINMENT_OPTIONS: &[&str] = &[
    "Elementary",
    "High School",
    "Vocational",
    "College",
    "Postgraduate",
];

pub const CLUTCH_TYPE_OPTIONS: &[&str] = &["Manual", "Automatic"];

pub const FAMILY_RELATION_OPTIONS: &[&str] = &["Mother", "Father", "Spouse"];

/// An application can still be edited while pending or sent back for
/// resubmission.
pub fn can_edit_application(status_id: &str) -> bool {
    matches!(status_id, "ASID_PEN" | "ASID_RSB")
}

pub fn is_application_approved(status_id: &str) -> bool {
    status_id == "ASID_APR"
}

pub fn is_application_rejected(status_id: &str) -> bool {
    status_id == "ASID_REJ"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_fall_back_to_the_raw_code() {
        assert_eq!(application_type_display_name("ATID_B"), "License Renewal");
        assert_eq!(application_type_display_name("ATID_X"), "ATID_X");
        assert_eq!(application_status_display_name("ASID_RSB"), "Resubmission Required");
        assert_eq!(vehicle_category_display_name("D"), "Bus");
    }

    #[test]
    fn editability_tracks_status_codes() {
        assert!(can_edit_application("ASID_PEN"));
        assert!(can_edit_application("ASID_RSB"));
        assert!(!can_edit_application("ASID_APR"));
        assert!(is_application_approved("ASID_APR"));
        assert!(is_application_rejected("ASID_REJ"));
    }
}
