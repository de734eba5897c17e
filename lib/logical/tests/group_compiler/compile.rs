use crate::test_utils::{compile_to_string, TestExpression, TestGroup};
use rdf_builder_logical::{Condition, GroupExpression};
use std::collections::HashSet;

#[test]
fn test_empty_group() {
    assert_eq!(TestGroup::new().compile(), None);
    assert_eq!(TestGroup::optional().compile(), None);
}

#[test]
fn test_group_with_empty_children() {
    let group = TestGroup::new()
        .with_child(TestGroup::new())
        .with_child(TestGroup::optional().with_child(TestGroup::new()));

    assert!(!group.is_empty());
    assert_eq!(group.compile(), None);
}

#[test]
fn test_single_pattern() {
    let group = TestGroup::new().with_pattern("p1");
    assert_eq!(group.compile(), Some(GroupExpression::Pattern("p1")));
}

#[test]
fn test_two_patterns() {
    let group = TestGroup::new().with_pattern("p1").with_pattern("p2");

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_patterns_form_left_deep_join() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_pattern("p2")
        .with_pattern("p3");

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Join
        Pattern: p1
        Pattern: p2
      Pattern: p3
    ");
}

#[test]
fn test_duplicate_pattern_is_joined_once() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_pattern("p2")
        .with_pattern("p1");

    let expression = group.compile().unwrap();
    assert_eq!(expression.leaves(), vec![&"p1", &"p2"]);
}

#[test]
fn test_filters_wrap_patterns() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_filter("c1")
        .with_filter("c2");

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Filter: c2
      Filter: c1
        Pattern: p1
    ");
}

#[test]
fn test_filter_chain_applies_all_filters_to_base() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_pattern("p2")
        .with_filter("c1")
        .with_filter("c2")
        .with_filter("c1");

    let mut expression = group.compile().unwrap();
    let mut conditions = HashSet::new();
    while let GroupExpression::Filter { inner, condition } = expression {
        conditions.extend(condition.atoms().into_iter().copied());
        expression = *inner;
    }

    assert_eq!(conditions, HashSet::from(["c1", "c2"]));
    assert_eq!(
        expression,
        GroupExpression::join(GroupExpression::Pattern("p1"), GroupExpression::Pattern("p2"))
    );
}

#[test]
fn test_filter_only_group() {
    let group = TestGroup::new().with_filter("c1");

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Filter: c1
      Empty
    ");
}

#[test]
fn test_filter_only_group_conjoins_filters() {
    let group = TestGroup::new().with_filter("c1").with_filter("c2");

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Filter: (c2 && c1)
      Empty
    ");
}

#[test]
fn test_filter_only_group_filters_first_child() {
    let group = TestGroup::new()
        .with_filter("c1")
        .with_child(TestGroup::new().with_pattern("p1"))
        .with_child(TestGroup::new().with_pattern("p2"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Filter: c1
        Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_filter_only_group_with_empty_children_keeps_filter() {
    let group = TestGroup::new()
        .with_filter("c1")
        .with_child(TestGroup::new());

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Filter: c1
      Empty
    ");
}

#[test]
fn test_filter_only_group_skips_empty_first_child() {
    let group = TestGroup::new()
        .with_filter("c1")
        .with_child(TestGroup::new())
        .with_child(TestGroup::new().with_pattern("p1"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Filter: c1
      Pattern: p1
    ");
}

#[test]
fn test_required_child() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(TestGroup::new().with_pattern("p2"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_required_child_with_filter_is_filtered_before_join() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(TestGroup::new().with_pattern("p2").with_filter("c"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Pattern: p1
      Filter: c
        Pattern: p2
    ");
}

#[test]
fn test_optional_child_without_filter() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(TestGroup::optional().with_pattern("p2"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin
      Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_optional_filter_becomes_join_condition() {
    let group = TestGroup::new()
        .with_child(TestGroup::new().with_pattern("p1"))
        .with_child(TestGroup::optional().with_pattern("p2").with_filter("c"));

    assert_eq!(
        group.compile(),
        Some(GroupExpression::left_join(
            GroupExpression::Pattern("p1"),
            GroupExpression::Pattern("p2"),
            Some(Condition::Atom("c")),
        ))
    );
    assert_eq!(
        group
            .compile()
            .unwrap()
            .count_nodes(|node| matches!(node, GroupExpression::Filter { .. })),
        0
    );
}

#[test]
fn test_optional_filters_are_conjoined_into_join_condition() {
    let group = TestGroup::new().with_pattern("p1").with_child(
        TestGroup::optional()
            .with_pattern("p2")
            .with_pattern("p3")
            .with_filter("c1")
            .with_filter("c2")
            .with_child(TestGroup::new().with_pattern("p4")),
    );

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin: (c2 && c1)
      Pattern: p1
      Join
        Join
          Pattern: p2
          Pattern: p3
        Pattern: p4
    ");
}

#[test]
fn test_filters_of_nested_children_of_optional_group_are_applied() {
    let group = TestGroup::new().with_pattern("p1").with_child(
        TestGroup::optional()
            .with_pattern("p2")
            .with_filter("c1")
            .with_child(TestGroup::new().with_pattern("p3").with_filter("c2")),
    );

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin: c1
      Pattern: p1
      Join
        Pattern: p2
        Filter: c2
          Pattern: p3
    ");
}

#[test]
fn test_optional_filter_only_child() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(TestGroup::optional().with_filter("c"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin: c
      Pattern: p1
      Filter: c
        Empty
    ");
}

#[test]
fn test_optional_filter_only_child_with_children() {
    let group = TestGroup::new().with_pattern("p0").with_child(
        TestGroup::optional()
            .with_filter("c")
            .with_child(TestGroup::new().with_pattern("p1"))
            .with_child(TestGroup::optional().with_pattern("p2").with_filter("d")),
    );

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin: c
      Pattern: p0
      LeftJoin: d
        Filter: c
          Pattern: p1
        Pattern: p2
    ");
}

#[test]
fn test_own_filters_apply_before_children_are_folded() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_filter("c1")
        .with_child(TestGroup::optional().with_pattern("p2"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin
      Filter: c1
        Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_first_child_becomes_base_regardless_of_optionality() {
    let group = TestGroup::new()
        .with_child(TestGroup::optional().with_pattern("p1"))
        .with_child(TestGroup::new().with_pattern("p2"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_empty_children_are_skipped() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(TestGroup::new())
        .with_child(TestGroup::optional())
        .with_child(TestGroup::new().with_pattern("p2"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      Pattern: p1
      Pattern: p2
    ");
}

#[test]
fn test_identical_children_are_both_folded() {
    let child = TestGroup::optional().with_pattern("p2");
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(child.clone())
        .with_child(child);

    insta::assert_snapshot!(compile_to_string(&group), @r"
    LeftJoin
      LeftJoin
        Pattern: p1
        Pattern: p2
      Pattern: p2
    ");
}

#[test]
fn test_nested_groups() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_child(
            TestGroup::optional()
                .with_pattern("p2")
                .with_child(TestGroup::optional().with_pattern("p3").with_filter("c1")),
        )
        .with_child(TestGroup::new().with_pattern("p4"));

    insta::assert_snapshot!(compile_to_string(&group), @r"
    Join
      LeftJoin
        Pattern: p1
        LeftJoin: c1
          Pattern: p2
          Pattern: p3
      Pattern: p4
    ");
}

#[test]
fn test_compile_is_idempotent() {
    let group = TestGroup::new()
        .with_pattern("p1")
        .with_filter("c1")
        .with_child(TestGroup::optional().with_pattern("p2").with_filter("c2"))
        .with_child(TestGroup::new().with_filter("c3"));

    assert_eq!(group.compile(), group.compile());
}

#[test]
fn test_child_order_only_changes_join_sides() {
    let first = TestGroup::new().with_pattern("p1");
    let second = TestGroup::new().with_pattern("p2").with_pattern("p3");

    let forward = TestGroup::new()
        .with_child(first.clone())
        .with_child(second.clone())
        .compile()
        .unwrap();
    let backward = TestGroup::new()
        .with_child(second)
        .with_child(first)
        .compile()
        .unwrap();

    assert_ne!(forward, backward);
    assert_eq!(
        forward.leaves().into_iter().collect::<HashSet<_>>(),
        backward.leaves().into_iter().collect::<HashSet<_>>()
    );
    for expression in [&forward, &backward] {
        let filters_and_left_joins = expression.count_nodes(|node| {
            matches!(
                node,
                GroupExpression::Filter { .. } | GroupExpression::LeftJoin { .. }
            )
        });
        assert_eq!(filters_and_left_joins, 0);
    }
}

#[test]
fn test_pattern_count_matches_recount() {
    fn recount(group: &TestGroup) -> usize {
        group.patterns().len() + group.children().iter().map(recount).sum::<usize>()
    }

    let group = TestGroup::new()
        .with_pattern("p1")
        .with_pattern("p1")
        .with_child(
            TestGroup::optional()
                .with_pattern("p2")
                .with_pattern("p3")
                .with_child(TestGroup::new().with_pattern("p1").with_pattern("p4")),
        )
        .with_child(TestGroup::new().with_filter("c"));

    assert_eq!(group.pattern_count(), 5);
    assert_eq!(group.pattern_count(), recount(&group));
}

#[test]
fn test_try_compile() {
    let group = TestGroup::new().with_pattern("p1");
    let expression: Option<TestExpression> = group.try_compile().unwrap();
    assert_eq!(expression, Some(GroupExpression::Pattern("p1")));
}
