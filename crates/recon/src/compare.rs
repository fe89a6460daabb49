use crate::model::{CommonPair, DateDiscrepancy, FieldComparison, Roster};

/// Compare auxiliary date fields across all confirmed pairs (exact-name
/// matches plus fuzzy-confirmed matches).
///
/// Comparison is exact post-normalization date equality; two nulls are
/// equal and never produce a discrepancy row. Each differing field emits
/// one row carrying the join key and both sides' values so a human can
/// adjudicate.
pub fn compare_fields(
    pairs: &[CommonPair],
    roster_a: &Roster,
    roster_b: &Roster,
) -> FieldComparison {
    let mut comparison = FieldComparison::default();

    for pair in pairs {
        let a = &roster_a.entities[pair.a_idx];
        let b = &roster_b.entities[pair.b_idx];

        if a.birth_date != b.birth_date {
            comparison.birth_date.push(DateDiscrepancy {
                full_name: a.full_name.clone(),
                value_a: a.birth_date,
                value_b: b.birth_date,
            });
        }
        if a.role_start != b.role_start {
            comparison.role_start.push(DateDiscrepancy {
                full_name: a.full_name.clone(),
                value_a: a.role_start,
                value_b: b.role_start,
            });
        }
    }

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;
    use chrono::NaiveDate;

    fn entity(name: &str, birth: Option<&str>, start: Option<&str>) -> Entity {
        let parse = |s: Option<&str>| {
            s.map(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").unwrap())
        };
        Entity {
            row: 0,
            full_name: name.into(),
            raw_name: name.into(),
            birth_date: parse(birth),
            role_start: parse(start),
        }
    }

    fn rosters(a: Vec<Entity>, b: Vec<Entity>) -> (Roster, Roster) {
        (
            Roster { source: "a.csv".into(), entities: a },
            Roster { source: "b.csv".into(), entities: b },
        )
    }

    #[test]
    fn differing_role_start_flagged() {
        let (a, b) = rosters(
            vec![entity("paul jones", Some("1970-02-02"), Some("2012-01-01"))],
            vec![entity("paul jones", Some("1970-02-02"), Some("2013-01-01"))],
        );
        let pairs = [CommonPair { a_idx: 0, b_idx: 0 }];
        let out = compare_fields(&pairs, &a, &b);
        assert!(out.birth_date.is_empty());
        assert_eq!(out.role_start.len(), 1);
        assert_eq!(out.role_start[0].full_name, "paul jones");
        assert_eq!(
            out.role_start[0].value_a,
            Some(NaiveDate::from_ymd_opt(2012, 1, 1).unwrap())
        );
        assert_eq!(
            out.role_start[0].value_b,
            Some(NaiveDate::from_ymd_opt(2013, 1, 1).unwrap())
        );
    }

    #[test]
    fn agreeing_pair_emits_nothing() {
        let (a, b) = rosters(
            vec![entity("paul jones", Some("1970-02-02"), Some("2012-01-01"))],
            vec![entity("paul jones", Some("1970-02-02"), Some("2012-01-01"))],
        );
        let out = compare_fields(&[CommonPair { a_idx: 0, b_idx: 0 }], &a, &b);
        assert!(out.birth_date.is_empty());
        assert!(out.role_start.is_empty());
    }

    #[test]
    fn null_vs_null_is_not_a_discrepancy() {
        let (a, b) = rosters(
            vec![entity("paul jones", None, None)],
            vec![entity("paul jones", None, None)],
        );
        let out = compare_fields(&[CommonPair { a_idx: 0, b_idx: 0 }], &a, &b);
        assert!(out.birth_date.is_empty());
        assert!(out.role_start.is_empty());
    }

    #[test]
    fn null_vs_value_is_a_discrepancy() {
        let (a, b) = rosters(
            vec![entity("paul jones", Some("1970-02-02"), None)],
            vec![entity("paul jones", None, None)],
        );
        let out = compare_fields(&[CommonPair { a_idx: 0, b_idx: 0 }], &a, &b);
        assert_eq!(out.birth_date.len(), 1);
        assert_eq!(out.birth_date[0].value_b, None);
        assert!(out.role_start.is_empty());
    }

    #[test]
    fn one_row_per_pair_per_field() {
        let (a, b) = rosters(
            vec![entity("paul jones", Some("1970-02-02"), Some("2012-01-01"))],
            vec![entity("paul jones", Some("1971-02-02"), Some("2013-01-01"))],
        );
        let out = compare_fields(&[CommonPair { a_idx: 0, b_idx: 0 }], &a, &b);
        assert_eq!(out.birth_date.len(), 1);
        assert_eq!(out.role_start.len(), 1);
    }
}
