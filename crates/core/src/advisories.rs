//! Service Advisory Formatting

use crate::transit::Incident;

/// Joins incident descriptions into one multi-line spoken message.
///
/// Incidents without a description (or with an empty one) are skipped;
/// input order is preserved. An empty result means there is nothing to say,
/// which is not an error here — the missing-list contract violation is
/// detected upstream on the payload.
pub fn format_advisories(incidents: &[Incident]) -> String {
    incidents
        .iter()
        .filter_map(|incident| incident.description.as_deref())
        .filter(|description| !description.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(description: Option<&str>) -> Incident {
        Incident {
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_joins_descriptions_in_order() {
        let incidents = vec![
            incident(Some("Delay at X")),
            incident(None),
            incident(Some("Delay at Y")),
        ];

        assert_eq!(format_advisories(&incidents), "Delay at X\nDelay at Y");
    }

    #[test]
    fn test_all_descriptions_missing_yields_empty_string() {
        let incidents = vec![incident(None), incident(None)];
        assert_eq!(format_advisories(&incidents), "");
    }

    #[test]
    fn test_empty_descriptions_are_skipped() {
        let incidents = vec![incident(Some("")), incident(Some("Single tracking on Red"))];
        assert_eq!(format_advisories(&incidents), "Single tracking on Red");
    }

    #[test]
    fn test_empty_list_yields_empty_string() {
        assert_eq!(format_advisories(&[]), "");
    }
}
