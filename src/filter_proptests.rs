use super::*;
use proptest::prelude::*;

fn row_strategy() -> impl Strategy<Value = SampleRow> {
    ("[a-zA-Z ]{0,16}", "[a-zA-Z ,.]{0,32}").prop_map(|(n, d)| SampleRow::new(n, d))
}

fn rows_strategy() -> impl Strategy<Value = Vec<SampleRow>> {
    prop::collection::vec(row_strategy(), 0..12)
}

proptest! {
    /// 表示ベクタの長さは常に行数と一致する
    #[test]
    fn prop_length_matches_rows(query in "[a-zA-Z]{0,6}", rows in rows_strategy()) {
        prop_assert_eq!(filter(&query, &rows).len(), rows.len());
    }

    /// 空クエリは全行表示、「該当なし」は出さない
    #[test]
    fn prop_empty_query_shows_everything(rows in rows_strategy()) {
        let outcome = evaluate("", &rows);
        prop_assert!(outcome.visibility.iter().all(|v| *v));
        prop_assert!(!outcome.show_no_results);
    }

    /// 大文字小文字を区別しない
    #[test]
    fn prop_case_insensitive(query in "[a-zA-Z]{1,6}", rows in rows_strategy()) {
        prop_assert_eq!(
            filter(&query.to_uppercase(), &rows),
            filter(&query.to_lowercase(), &rows)
        );
    }

    /// 同じ入力なら同じ結果
    #[test]
    fn prop_idempotent(query in "[a-zA-Z ]{0,6}", rows in rows_strategy()) {
        prop_assert_eq!(filter(&query, &rows), filter(&query, &rows));
    }

    /// 各行の結果は他の行に依存しない
    #[test]
    fn prop_rows_are_independent(query in "[a-zA-Z]{0,4}", rows in rows_strategy()) {
        let all = filter(&query, &rows);
        for (row, visible) in rows.iter().zip(all.iter()) {
            prop_assert_eq!(filter(&query, std::slice::from_ref(row)), vec![*visible]);
        }
    }
}
