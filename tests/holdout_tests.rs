//! Holdout construction tests on small hand-written snapshots.

use cafa_holdout::holdout::{build_holdout_sets, EvidenceFilter};
use cafa_holdout::model::{AnnotationTable, EvidenceCodeSet, ProteinTermPair};
use cafa_holdout::parsers::parse_table_str;
use cafa_holdout::reports::render_table;
use cafa_holdout::FailureKind;

fn snapshot(body: &str) -> AnnotationTable {
    parse_table_str(&format!("protein_id\tgo_term\tevidence_code\tqualifier\n{body}"))
        .expect("valid snapshot")
}

fn pairs(table: &AnnotationTable) -> Vec<ProteinTermPair> {
    table.pairs().expect("key columns").into_iter().collect()
}

// ============================================================================
// Worked scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn basic_delta() {
        let n = snapshot("P1\tGO:1\tEXP\t\nP2\tGO:2\tIEA\t\n");
        let next = snapshot("P1\tGO:1\tEXP\t\nP1\tGO:3\tEXP\t\n");

        let sets = build_holdout_sets(&n, &next, &EvidenceFilter::curated()).unwrap();

        assert_eq!(pairs(&sets.known), vec![ProteinTermPair::new("P1", "GO:1")]);
        assert_eq!(
            pairs(&sets.gt_all),
            vec![
                ProteinTermPair::new("P1", "GO:1"),
                ProteinTermPair::new("P1", "GO:3")
            ]
        );
        assert_eq!(
            pairs(&sets.gt_new_pairs),
            vec![ProteinTermPair::new("P1", "GO:3")]
        );
        assert_eq!(sets.gt_new_pairs.rows().next().unwrap().evidence_code(), Some("EXP"));
    }

    #[test]
    fn negation_excluded_other_qualifiers_kept() {
        let n = snapshot("P9\tGO:9\tEXP\t\n");
        let next = snapshot("P1\tGO:4\tEXP\tNOT\nP1\tGO:5\tEXP\tcontributes_to\n");

        let sets = build_holdout_sets(&n, &next, &EvidenceFilter::curated()).unwrap();

        assert_eq!(pairs(&sets.gt_all), vec![ProteinTermPair::new("P1", "GO:5")]);
        assert_eq!(
            pairs(&sets.gt_new_pairs),
            vec![ProteinTermPair::new("P1", "GO:5")]
        );
    }

    #[test]
    fn no_new_annotations() {
        let n = snapshot("P1\tGO:1\tEXP\t\nP1\tGO:2\tIDA\t\nP2\tGO:1\tTAS\t\n");
        let next = snapshot("P1\tGO:1\tIDA\t\nP2\tGO:1\tEXP\t\n");

        let sets = build_holdout_sets(&n, &next, &EvidenceFilter::curated()).unwrap();

        assert_eq!(sets.gt_all.len(), 2);
        assert!(sets.gt_new_pairs.is_empty());
        assert_eq!(sets.summary.pairs_new, 0);
        assert_eq!(sets.summary.pairs_carried, 2);
    }
}

// ============================================================================
// Filter behaviour through the public API
// ============================================================================

mod filtering {
    use super::*;

    #[test]
    fn negated_pair_at_n_does_not_hide_positive_pair_at_next() {
        let n = snapshot("P1\tGO:7\tIDA\tNOT|enables\n");
        let next = snapshot("P1\tGO:7\tIDA\tenables\n");

        let sets = build_holdout_sets(&n, &next, &EvidenceFilter::curated()).unwrap();
        assert!(sets.known.is_empty());
        assert_eq!(pairs(&sets.gt_new_pairs), vec![ProteinTermPair::new("P1", "GO:7")]);
    }

    #[test]
    fn custom_code_set_changes_what_counts_as_known() {
        let n = snapshot("P1\tGO:1\tIEA\t\n");
        let next = snapshot("P1\tGO:1\tEXP\t\n");

        let curated = build_holdout_sets(&n, &next, &EvidenceFilter::curated()).unwrap();
        assert_eq!(curated.gt_new_pairs.len(), 1);

        let with_iea = EvidenceFilter::new(EvidenceCodeSet::parse_list("EXP,IEA"));
        let lenient = build_holdout_sets(&n, &next, &with_iea).unwrap();
        assert!(lenient.gt_new_pairs.is_empty());
    }

    #[test]
    fn passthrough_columns_survive() {
        let table = parse_table_str(
            "db\tprotein_id\tgo_term\tevidence_code\twith_from\n\
             UniProtKB\tP1\tGO:1\tIPI\tUniProtKB:P2\n",
        )
        .unwrap();
        let filtered = EvidenceFilter::curated().apply(&table).unwrap();
        assert_eq!(
            filtered.columns().collect::<Vec<_>>(),
            vec!["db", "protein_id", "go_term", "evidence_code", "with_from"]
        );
        assert_eq!(filtered.rows().next().unwrap().get("with_from"), Some("UniProtKB:P2"));
    }

    #[test]
    fn ground_truth_leads_with_protein_and_term() {
        let header = "db\tprotein_id\tsymbol\tqualifier\tgo_term\tevidence_code\n";
        let n = parse_table_str(&format!("{header}UniProtKB\tP1\tABC1\tenables\tGO:1\tEXP\n"))
            .unwrap();
        let next = parse_table_str(&format!(
            "{header}UniProtKB\tP1\tABC1\tenables\tGO:1\tEXP\n\
             UniProtKB\tP1\tABC1\tenables\tGO:2\tIDA\n"
        ))
        .unwrap();

        let sets = build_holdout_sets(&n, &next, &EvidenceFilter::curated()).unwrap();

        assert_eq!(
            render_table(&sets.gt_new_pairs),
            "protein_id\tgo_term\tdb\tsymbol\tqualifier\tevidence_code\n\
             P1\tGO:2\tUniProtKB\tABC1\tenables\tIDA\n"
        );
        assert!(render_table(&sets.gt_all).starts_with("db\tprotein_id"));
    }

    #[test]
    fn missing_evidence_column_is_schema_error() {
        let table = parse_table_str("protein_id\tgo_term\nP1\tGO:1\n").unwrap();
        let err = EvidenceFilter::curated().apply(&table).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Schema);
    }
}
