use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::{GroupId, SectionKey, SectionStatus, WarehouseKind};
use crate::error::DomainError;

/// Section statuses keyed by section.
pub type StatusMap = BTreeMap<SectionKey, SectionStatus>;

/// Section counts and utilization for one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UtilizationStats {
    pub total_sections: u32,
    pub occupied_sections: u32,
    pub available_sections: u32,
    pub utilization_percent: u8,
}

impl UtilizationStats {
    pub fn from_statuses<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a SectionStatus>,
    {
        let (total, occupied) = statuses
            .into_iter()
            .fold((0u32, 0u32), |(total, occupied), status| {
                (total + 1, occupied + u32::from(status.is_occupied()))
            });

        Self {
            total_sections: total,
            occupied_sections: occupied,
            available_sections: total - occupied,
            utilization_percent: utilization_percent(occupied, total),
        }
    }

    /// Every section occupied (and at least one section exists).
    pub fn is_full(&self) -> bool {
        self.total_sections > 0 && self.occupied_sections == self.total_sections
    }
}

/// `round(occupied / total * 100)` with halves rounded up; 0 for an empty scope.
pub fn utilization_percent(occupied: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let occupied = u64::from(occupied.min(total));
    let total = u64::from(total);
    // floor((200 * o + t) / (2 * t)) == floor(100 * o / t + 1/2)
    ((200 * occupied + total) / (2 * total)) as u8
}

/// Which sections a stats query covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "value", rename_all = "lowercase")]
pub enum Scope {
    All,
    Kind(WarehouseKind),
    Warehouse(GroupId),
}

impl Scope {
    /// "all", "indoor", "outdoor", or a warehouse identifier.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "" | "all" => Ok(Self::All),
            other => match WarehouseKind::from_str(other) {
                Some(kind) => Ok(Self::Kind(kind)),
                None => GroupId::parse(other).map(Self::Warehouse),
            },
        }
    }
}

pub fn overall(statuses: &StatusMap) -> UtilizationStats {
    UtilizationStats::from_statuses(statuses.values())
}

pub fn for_group(statuses: &StatusMap, group: &GroupId) -> UtilizationStats {
    for_groups(statuses, std::slice::from_ref(group))
}

/// Sections whose group token equals one of `groups` exactly.
pub fn for_groups(statuses: &StatusMap, groups: &[GroupId]) -> UtilizationStats {
    UtilizationStats::from_statuses(
        statuses
            .iter()
            .filter(|(key, _)| groups.contains(&key.group))
            .map(|(_, status)| status),
    )
}

/// Stats for a scope; `kinds` maps each known warehouse to indoor/outdoor.
pub fn for_scope(
    statuses: &StatusMap,
    kinds: &BTreeMap<GroupId, WarehouseKind>,
    scope: &Scope,
) -> UtilizationStats {
    match scope {
        Scope::All => overall(statuses),
        Scope::Warehouse(group) => for_group(statuses, group),
        Scope::Kind(kind) => {
            let groups: Vec<GroupId> = kinds
                .iter()
                .filter(|(_, k)| *k == kind)
                .map(|(group, _)| group.clone())
                .collect();
            for_groups(statuses, &groups)
        }
    }
}

/// Overall plus indoor/outdoor split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub overall: UtilizationStats,
    pub indoor: UtilizationStats,
    pub outdoor: UtilizationStats,
}

pub fn by_kind(statuses: &StatusMap, kinds: &BTreeMap<GroupId, WarehouseKind>) -> KindBreakdown {
    KindBreakdown {
        overall: overall(statuses),
        indoor: for_scope(statuses, kinds, &Scope::Kind(WarehouseKind::Indoor)),
        outdoor: for_scope(statuses, kinds, &Scope::Kind(WarehouseKind::Outdoor)),
    }
}

/// Aggregate a raw "A1" -> status mapping.
///
/// Without a filter every entry counts. With a filter, entries whose key does
/// not parse belong to no group and are skipped.
pub fn from_raw_keys(
    statuses: &HashMap<String, SectionStatus>,
    groups: Option<&[GroupId]>,
) -> UtilizationStats {
    match groups {
        None => UtilizationStats::from_statuses(statuses.values()),
        Some(groups) => UtilizationStats::from_statuses(
            statuses
                .iter()
                .filter(|(raw, _)| {
                    SectionKey::parse(raw)
                        .map(|key| groups.contains(&key.group))
                        .unwrap_or(false)
                })
                .map(|(_, status)| status),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str) -> GroupId {
        GroupId::parse(id).unwrap()
    }

    fn statuses(entries: &[(&str, SectionStatus)]) -> StatusMap {
        entries
            .iter()
            .map(|(key, status)| (SectionKey::parse(key).unwrap(), *status))
            .collect()
    }

    use SectionStatus::{Available, Occupied};

    #[test]
    fn test_empty_mapping_is_zero() {
        let stats = overall(&StatusMap::new());
        assert_eq!(stats, UtilizationStats::default());
        assert!(!stats.is_full());
    }

    #[test]
    fn test_group_filter() {
        let map = statuses(&[("A1", Occupied), ("A2", Available), ("B1", Occupied)]);
        let stats = for_group(&map, &group("A"));
        assert_eq!(
            stats,
            UtilizationStats {
                total_sections: 2,
                occupied_sections: 1,
                available_sections: 1,
                utilization_percent: 50,
            }
        );
    }

    #[test]
    fn test_group_filter_is_exact_token() {
        let map = statuses(&[("A1", Occupied), ("AB1", Occupied), ("AB2", Available)]);
        assert_eq!(for_group(&map, &group("A")).total_sections, 1);
        assert_eq!(for_group(&map, &group("AB")).total_sections, 2);
    }

    #[test]
    fn test_counts_always_add_up() {
        let all = [Occupied, Available];
        for n in 0..6usize {
            for mask in 0..(1u32 << n) {
                let map: StatusMap = (0..n)
                    .map(|i| {
                        let status = all[((mask >> i) & 1) as usize];
                        (SectionKey::new(group("C"), i as u32 + 1), status)
                    })
                    .collect();
                let stats = overall(&map);
                assert_eq!(stats.occupied_sections + stats.available_sections, stats.total_sections);
                assert!(stats.utilization_percent <= 100);
            }
        }
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(utilization_percent(1, 3), 33);
        assert_eq!(utilization_percent(2, 3), 67);
        assert_eq!(utilization_percent(1, 8), 13); // 12.5
        assert_eq!(utilization_percent(1, 200), 1); // 0.5
        assert_eq!(utilization_percent(0, 0), 0);
        assert_eq!(utilization_percent(5, 5), 100);
    }

    #[test]
    fn test_percent_is_monotonic() {
        let mut map: StatusMap = (1..=7)
            .map(|n| (SectionKey::new(group("D"), n), Available))
            .collect();
        let mut last = overall(&map).utilization_percent;
        let keys: Vec<SectionKey> = map.keys().cloned().collect();
        for key in keys {
            map.insert(key, Occupied);
            let next = overall(&map).utilization_percent;
            assert!(next >= last);
            last = next;
        }
        assert_eq!(last, 100);
        assert!(overall(&map).is_full());
    }

    #[test]
    fn test_by_kind() {
        let map = statuses(&[("A1", Occupied), ("A2", Occupied), ("E1", Available), ("E2", Occupied)]);
        let kinds: BTreeMap<GroupId, WarehouseKind> = [
            (group("A"), WarehouseKind::Indoor),
            (group("E"), WarehouseKind::Outdoor),
        ]
        .into_iter()
        .collect();

        let breakdown = by_kind(&map, &kinds);
        assert_eq!(breakdown.indoor.utilization_percent, 100);
        assert_eq!(breakdown.outdoor.utilization_percent, 50);
        assert_eq!(breakdown.overall.utilization_percent, 75);
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!(Scope::parse("all").unwrap(), Scope::All);
        assert_eq!(Scope::parse("indoor").unwrap(), Scope::Kind(WarehouseKind::Indoor));
        assert_eq!(Scope::parse("B").unwrap(), Scope::Warehouse(group("B")));
        assert!(Scope::parse("b1").is_err());
    }

    #[test]
    fn test_raw_keys() {
        let raw: HashMap<String, SectionStatus> = [
            ("A1".to_string(), Occupied),
            ("A2".to_string(), Available),
            ("B1".to_string(), Occupied),
            ("section0".to_string(), Occupied),
        ]
        .into_iter()
        .collect();

        assert_eq!(from_raw_keys(&raw, None).total_sections, 4);
        let a = [group("A")];
        let stats = from_raw_keys(&raw, Some(&a));
        assert_eq!(stats.total_sections, 2);
        assert_eq!(stats.utilization_percent, 50);
    }
}
