//! Output file naming.
//!
//! Bulk outputs keep the source base name: `{base}_updated_{yyyyMMdd_HHmm}{ext}`.
//! Single-document outputs use a fixed stem: `edi_update_{yyyyMMdd_HHmm}{ext}`.
//! The extension is carried over from the source file, defaulting to `.txt`.

use chrono::NaiveDateTime;

const DEFAULT_EXTENSION: &str = ".txt";

/// `yyyyMMdd_HHmm` stamp embedded in output names.
pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M").to_string()
}

/// The final dot-extension of a file name, or `.txt` when there is none.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() && !name[pos + 1..].contains('/') => &name[pos..],
        _ => DEFAULT_EXTENSION,
    }
}

/// File name without its final dot-extension.
pub fn base_name_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() && !name[pos + 1..].contains('/') => &name[..pos],
        _ => name,
    }
}

/// Output name for one document of a bulk run.
pub fn bulk_output_name(original: &str, now: NaiveDateTime) -> String {
    format!(
        "{}_updated_{}{}",
        base_name_of(original),
        format_timestamp(now),
        extension_of(original)
    )
}

/// Output name for a single-document run.
pub fn single_output_name(original: &str, now: NaiveDateTime) -> String {
    format!(
        "edi_update_{}{}",
        format_timestamp(now),
        extension_of(original)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn bulk_names_keep_the_base_name() {
        assert_eq!(
            bulk_output_name("orders_850.edi", fixed_now()),
            "orders_850_updated_20240115_0905.edi"
        );
        assert_eq!(
            bulk_output_name("po.dat", fixed_now()),
            "po_updated_20240115_0905.dat"
        );
    }

    #[test]
    fn single_names_use_the_fixed_stem() {
        assert_eq!(
            single_output_name("orders_850.edi", fixed_now()),
            "edi_update_20240115_0905.edi"
        );
    }

    #[test]
    fn missing_extensions_default_to_txt() {
        assert_eq!(extension_of("noext"), ".txt");
        assert_eq!(extension_of("trailing."), ".txt");
        assert_eq!(
            bulk_output_name("noext", fixed_now()),
            "noext_updated_20240115_0905.txt"
        );
    }

    #[test]
    fn only_the_last_extension_is_replaced() {
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(base_name_of("archive.tar.gz"), "archive.tar");
    }
}
