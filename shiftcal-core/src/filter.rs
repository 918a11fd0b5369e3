//! Name-based filtering of parsed shifts.

use crate::shift::Shift;

/// Include/exclude filtering options.
///
/// The include list wins: when it is non-empty the exclude list is never
/// consulted. Matching is case-sensitive and exact on the stripped name.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keep only shifts with these names.
    pub include: Vec<String>,
    /// Drop shifts with these names.
    pub exclude: Vec<String>,
    /// Keep special shifts (trailing `*`) regardless of the name lists.
    pub keep_special: bool,
}

/// Apply the include/exclude policy, preserving input order.
pub fn filter_shifts(shifts: &[Shift], opts: &FilterOptions) -> Vec<Shift> {
    shifts
        .iter()
        .filter(|shift| {
            let name = shift.name();
            if !opts.include.is_empty() {
                opts.include.iter().any(|n| n == name)
                    || (opts.keep_special && shift.is_special())
            } else if !opts.exclude.is_empty() {
                !opts.exclude.iter().any(|n| n == name)
                    || (opts.keep_special && shift.is_special())
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_shifts;

    fn sample_shifts() -> Vec<Shift> {
        let text = "Mi. 30.04 17:00 01:00 Thomas\n\
                    18:00 02:00 Julia *\n\
                    Do. 01.05 00:00 08:00 Sarah";
        parse_shifts(text, 2025).unwrap()
    }

    fn names(shifts: &[Shift]) -> Vec<&str> {
        shifts.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_no_filters_keep_everything() {
        let shifts = sample_shifts();
        let kept = filter_shifts(&shifts, &FilterOptions::default());
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_include_without_override_drops_specials_too() {
        // Julia is special, but specials only ride along when the
        // override is set; she never matched the include list.
        let shifts = sample_shifts();
        let kept = filter_shifts(
            &shifts,
            &FilterOptions {
                include: vec!["Thomas".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(names(&kept), ["Thomas"]);
    }

    #[test]
    fn test_include_with_override_keeps_specials() {
        let shifts = sample_shifts();
        let kept = filter_shifts(
            &shifts,
            &FilterOptions {
                include: vec!["Thomas".to_string()],
                keep_special: true,
                ..Default::default()
            },
        );
        assert_eq!(names(&kept), ["Thomas", "Julia"]);
    }

    #[test]
    fn test_exclude_drops_matching_names() {
        let shifts = sample_shifts();
        let kept = filter_shifts(
            &shifts,
            &FilterOptions {
                exclude: vec!["Sarah".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(names(&kept), ["Thomas", "Julia"]);
    }

    #[test]
    fn test_excluded_special_survives_with_override() {
        let shifts = sample_shifts();
        let dropped = filter_shifts(
            &shifts,
            &FilterOptions {
                exclude: vec!["Julia".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(names(&dropped), ["Thomas", "Sarah"]);

        let kept = filter_shifts(
            &shifts,
            &FilterOptions {
                exclude: vec!["Julia".to_string()],
                keep_special: true,
                ..Default::default()
            },
        );
        assert_eq!(names(&kept), ["Thomas", "Julia", "Sarah"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let shifts = sample_shifts();
        let kept = filter_shifts(
            &shifts,
            &FilterOptions {
                include: vec!["thomas".to_string()],
                ..Default::default()
            },
        );
        assert!(kept.is_empty(), "lowercase 'thomas' must not match 'Thomas'");
    }
}
