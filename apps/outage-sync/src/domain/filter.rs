//! Relevance filtering of outages against a site's device registry.

use chrono::{DateTime, Utc};
use outage_api::models::{Outage, SiteInfo, SiteOutage};

/// Select the outages relevant to a site and project them for submission.
///
/// An outage is relevant when its device id is registered to the site and it
/// begins at or after `min_begin` (instant comparison, both sides UTC).
/// Input order is preserved; duplicate device ids in the registry resolve to
/// the last entry's name. An empty registry yields an empty result.
#[must_use]
pub fn relevant_outages(
    outages: &[Outage],
    site: &SiteInfo,
    min_begin: DateTime<Utc>,
) -> Vec<SiteOutage> {
    let names = site.device_names();
    outages
        .iter()
        .filter_map(|outage| {
            let name = names.get(outage.id.as_str())?;
            if outage.begin < min_begin {
                return None;
            }
            Some(SiteOutage {
                id: outage.id.clone(),
                name: (*name).to_owned(),
                begin: outage.begin,
                end: outage.end,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use outage_api::models::Device;

    fn cutoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).single().unwrap()
    }

    fn outage(id: &str, begin: &str, end: &str) -> Outage {
        Outage {
            id: id.to_owned(),
            begin: begin.parse().unwrap(),
            end: end.parse().unwrap(),
        }
    }

    fn registry(devices: &[(&str, &str)]) -> SiteInfo {
        SiteInfo {
            devices: devices
                .iter()
                .map(|(id, name)| Device {
                    id: (*id).to_owned(),
                    name: (*name).to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn registered_device_after_cutoff_is_projected() {
        let outages = vec![outage(
            "d1",
            "2022-05-23T12:21:27.377Z",
            "2022-11-13T02:16:38.905Z",
        )];
        let site = registry(&[("d1", "Test Device")]);

        let result = relevant_outages(&outages, &site, cutoff());

        assert_eq!(
            result,
            vec![SiteOutage {
                id: "d1".to_owned(),
                name: "Test Device".to_owned(),
                begin: "2022-05-23T12:21:27.377Z".parse().unwrap(),
                end: "2022-11-13T02:16:38.905Z".parse().unwrap(),
            }]
        );
    }

    #[test]
    fn outage_before_cutoff_is_excluded() {
        let outages = vec![outage(
            "d1",
            "2021-12-31T23:59:59.999Z",
            "2022-02-01T00:00:00.000Z",
        )];
        let site = registry(&[("d1", "Test Device")]);

        assert!(relevant_outages(&outages, &site, cutoff()).is_empty());
    }

    #[test]
    fn outage_exactly_at_cutoff_is_included() {
        let outages = vec![outage(
            "d1",
            "2022-01-01T00:00:00.000Z",
            "2022-02-01T00:00:00.000Z",
        )];
        let site = registry(&[("d1", "Test Device")]);

        assert_eq!(relevant_outages(&outages, &site, cutoff()).len(), 1);
    }

    #[test]
    fn unregistered_device_is_excluded() {
        let outages = vec![outage(
            "d9",
            "2022-05-23T12:21:27.377Z",
            "2022-11-13T02:16:38.905Z",
        )];
        let site = registry(&[("d1", "Test Device")]);

        assert!(relevant_outages(&outages, &site, cutoff()).is_empty());
    }

    #[test]
    fn empty_registry_yields_empty_result() {
        let outages = vec![outage(
            "d1",
            "2022-05-23T12:21:27.377Z",
            "2022-11-13T02:16:38.905Z",
        )];

        assert!(relevant_outages(&outages, &SiteInfo::default(), cutoff()).is_empty());
    }

    #[test]
    fn input_order_is_preserved() {
        let outages = vec![
            outage("d2", "2022-03-01T00:00:00.000Z", "2022-03-02T00:00:00.000Z"),
            outage("d1", "2022-02-01T00:00:00.000Z", "2022-02-02T00:00:00.000Z"),
            outage("d2", "2022-01-05T00:00:00.000Z", "2022-01-06T00:00:00.000Z"),
        ];
        let site = registry(&[("d1", "One"), ("d2", "Two")]);

        let result = relevant_outages(&outages, &site, cutoff());
        let ids: Vec<&str> = result.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, ["d2", "d1", "d2"]);
    }

    #[test]
    fn duplicate_registry_entries_use_last_name() {
        let outages = vec![outage(
            "d1",
            "2022-05-23T12:21:27.377Z",
            "2022-11-13T02:16:38.905Z",
        )];
        let site = registry(&[("d1", "Old Name"), ("d1", "New Name")]);

        let result = relevant_outages(&outages, &site, cutoff());
        assert_eq!(result[0].name, "New Name");
    }

    #[test]
    fn filtering_is_deterministic() {
        let outages = vec![
            outage("d1", "2022-02-01T00:00:00.000Z", "2022-02-02T00:00:00.000Z"),
            outage("d9", "2022-02-01T00:00:00.000Z", "2022-02-02T00:00:00.000Z"),
        ];
        let site = registry(&[("d1", "Test Device")]);

        let first = relevant_outages(&outages, &site, cutoff());
        let second = relevant_outages(&outages, &site, cutoff());
        assert_eq!(first, second);
    }
}
