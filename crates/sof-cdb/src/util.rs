//! Helpers shared with the vendor binding layer.

/// Short text fields are packed into 32-bit integers, four ASCII bytes in
/// little-endian order. Decodes one such field.
pub fn packed_str(value: u32) -> String {
    value.to_le_bytes().iter().map(|&b| char::from(b)).collect()
}

/// Name of the element kind owning the given definition key.
pub fn element_kind_name(key: u16) -> Option<&'static str> {
    match key {
        20 => Some("NODE"),
        100 => Some("BEAM"),
        150 => Some("TRUSS"),
        160 => Some("CABLE"),
        170 => Some("SPRING"),
        180 => Some("EDGE"),
        190 => Some("PIPE"),
        200 => Some("QUAD"),
        300 => Some("BRIC"),
        _ => None,
    }
}

const STATUS_FLAGS: [(u32, &str); 6] = [
    (32, "File has active locks"),
    (16, "File has been written"),
    (8, "File has been read"),
    (4, "File has ByteSwap"),
    (2, "Index is connected to file"),
    (1, "CDBase is active"),
];

/// Render the status bitmask reported for a database handle, one line per
/// set flag, highest flag first.
pub fn describe_status(status: u32) -> String {
    STATUS_FLAGS
        .iter()
        .filter(|(bit, _)| status & bit != 0)
        .map(|(_, line)| format!("\t{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_vendor_text_fields() {
        // Reference values from the decode helper shipped with the vendor
        // package.
        assert_eq!(packed_str(538985306), "ZC  ");
        assert_eq!(packed_str(538986067), "SF  ");
        assert_eq!(packed_str(542400332), "L_T ");
        assert_eq!(packed_str(540237639), "G_3 ");
    }

    #[test]
    fn names_the_element_kinds() {
        let pairs = [
            (20, "NODE"),
            (100, "BEAM"),
            (150, "TRUSS"),
            (160, "CABLE"),
            (170, "SPRING"),
            (180, "EDGE"),
            (190, "PIPE"),
            (200, "QUAD"),
            (300, "BRIC"),
        ];
        for (key, name) in pairs {
            assert_eq!(element_kind_name(key), Some(name));
        }
        assert_eq!(element_kind_name(999), None);
    }

    #[test]
    fn renders_single_status_flags() {
        assert_eq!(describe_status(1), "\tCDBase is active");
        assert_eq!(describe_status(2), "\tIndex is connected to file");
        assert_eq!(describe_status(32), "\tFile has active locks");
    }

    #[test]
    fn renders_combined_status_highest_flag_first() {
        assert_eq!(
            describe_status(3),
            "\tIndex is connected to file\n\tCDBase is active"
        );
    }
}
