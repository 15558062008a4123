use netric_query::{BooleanLogic, Direction, Operator, OrderBy, Query, QueryPayload};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Conditions ───────────────────────────────────────────────────

#[test]
fn new_query_is_empty() {
    let q = Query::new("customer");
    assert_eq!(q.obj_type(), "customer");
    assert!(q.get_conditions().is_empty());
    assert!(q.get_order_by().is_empty());
    assert_eq!(q.get_limit(), None);
    assert_eq!(q.get_offset(), 0);
}

#[test]
fn where_field_appends_and_condition() {
    let mut q = Query::new("customer");
    q.where_field("name").equal_to("Acme");

    let conds = q.get_conditions();
    assert_eq!(conds.len(), 1);
    assert_eq!(conds[0].field_name(), "name");
    assert_eq!(conds[0].operator(), &Operator::IsEqual);
    assert_eq!(conds[0].value, json!("Acme"));
    assert_eq!(conds[0].blogic(), BooleanLogic::And);
}

#[test]
fn or_where_tags_or() {
    let mut q = Query::new("customer");
    q.where_field("type_id").equal_to(1);
    q.or_where("type_id").equal_to(2);

    assert_eq!(q.get_conditions()[1].blogic(), BooleanLogic::Or);
}

#[test]
fn conditions_keep_insertion_order() {
    let mut q = Query::new("task");
    q.where_field("done").equal_to(false);
    q.and_where("owner_id").not_equal_to(3);
    q.or_where("name").begins_with("Call");

    let names: Vec<&str> = q.get_conditions().iter().map(|c| c.field_name()).collect();
    assert_eq!(names, vec!["done", "owner_id", "name"]);
}

#[test]
fn builder_methods_set_operator() {
    let mut q = Query::new("task");
    q.where_field("a").greater_than(1);
    q.and_where("b").less_than(2);
    q.and_where("c").greater_or_equal_to(3);
    q.and_where("d").less_or_equal_to(4);
    q.and_where("e").contains("x");
    q.and_where("f").day_is_equal(5);
    q.and_where("g").month_is_equal(6);
    q.and_where("h").year_is_equal(2024);
    q.and_where("i").last_num_days(7);
    q.and_where("j").next_num_months(2);

    let ops: Vec<&str> = q.get_conditions().iter().map(|c| c.operator().as_str()).collect();
    assert_eq!(
        ops,
        vec![
            "is_greater",
            "is_less",
            "is_greater_or_equal",
            "is_less_or_equal",
            "contains",
            "day_is_equal",
            "month_is_equal",
            "year_is_equal",
            "last_x_days",
            "next_x_months",
        ]
    );
}

#[test]
fn unknown_operator_is_accepted() {
    let mut q = Query::new("task");
    q.where_field("name").with("sounds_like", "smith");

    assert_eq!(
        q.get_conditions()[0].operator(),
        &Operator::Other("sounds_like".into())
    );
}

#[test]
fn unknown_field_is_accepted() {
    let mut q = Query::new("task");
    q.where_field("no_such_field").equal_to(1);
    assert_eq!(q.get_conditions().len(), 1);
}

#[test]
fn returned_condition_value_is_mutable() {
    let mut q = Query::new("task");
    let cond = q.where_field("name").equal_to("draft");
    cond.value = json!("final");

    assert_eq!(q.get_conditions()[0].value, json!("final"));
}

#[test]
fn condition_accessor_allows_direct_value_edit() {
    let mut q = Query::new("task");
    q.where_field("priority").condition().set_value(3);

    let cond = &q.get_conditions()[0];
    assert_eq!(cond.operator(), &Operator::IsEqual);
    assert_eq!(cond.value, json!(3));
}

#[test]
fn conditions_editable_in_place() {
    let mut q = Query::new("task");
    q.where_field("status").equal_to("open");

    for cond in q.get_conditions_mut() {
        cond.value = json!("closed");
    }
    assert_eq!(q.get_conditions()[0].value, json!("closed"));
}

#[test]
fn clear_conditions_empties_sequence() {
    let mut q = Query::new("task");
    q.where_field("a").equal_to(1);
    q.clear_conditions();
    assert!(q.get_conditions().is_empty());
}

// ── Ordering & paging ────────────────────────────────────────────

#[test]
fn order_by_is_not_deduplicated() {
    let mut q = Query::new("task");
    q.set_order_by("name", Direction::Asc);
    q.set_order_by("name", Direction::Desc);

    assert_eq!(
        q.get_order_by(),
        &[
            OrderBy::new("name", Direction::Asc),
            OrderBy::new("name", Direction::Desc),
        ]
    );
}

#[test]
fn negative_paging_passes_through() {
    let mut q = Query::new("task");
    q.set_limit(-1);
    q.set_offset(-20);
    assert_eq!(q.get_limit(), Some(-1));
    assert_eq!(q.get_offset(), -20);
}

// ── Payload ──────────────────────────────────────────────────────

#[test]
fn payload_shape() {
    let mut q = Query::new("customer");
    q.where_field("type_id").equal_to(2);
    q.or_where("name").contains("acme");
    q.set_order_by("name", Direction::Desc);
    q.set_limit(25);
    q.set_offset(50);

    let data = serde_json::to_value(q.query_to_data()).unwrap();
    assert_eq!(
        data,
        json!({
            "obj_type": "customer",
            "conditions": [
                {"field_name": "type_id", "operator": "is_equal", "value": 2, "blogic": "and"},
                {"field_name": "name", "operator": "contains", "value": "acme", "blogic": "or"},
            ],
            "order_by": [{"field_name": "name", "order": "desc"}],
            "limit": 25,
            "offset": 50,
        })
    );
}

#[test]
fn payload_field_order_is_fixed() {
    let q = Query::new("note");
    assert_eq!(
        q.cache_key().unwrap(),
        r#"{"obj_type":"note","conditions":[],"order_by":[],"limit":null,"offset":0}"#
    );
}

#[test]
fn from_data_round_trips() {
    let mut q = Query::new("customer");
    q.where_field("name").with("custom_op", json!(["a", "b"]));
    q.set_order_by("ts_entered", Direction::Desc);

    let again = Query::from_data(q.query_to_data());
    assert_eq!(again, q);
    assert_eq!(again.query_to_data(), q.query_to_data());
}

#[test]
fn payload_parses_with_missing_sequences() {
    let data = QueryPayload::from_json(r#"{"obj_type":"task"}"#).unwrap();
    let q = Query::from(data);
    assert!(q.get_conditions().is_empty());
    assert_eq!(q.get_limit(), None);
}

#[test]
fn payload_accepts_uppercase_direction() {
    let data = QueryPayload::from_json(
        r#"{"obj_type":"task","order_by":[{"field_name":"name","order":"DESC"}]}"#,
    )
    .unwrap();
    assert_eq!(data.order_by[0].direction, Direction::Desc);
}

#[test]
fn equal_queries_share_cache_key() {
    let build = || {
        let mut q = Query::new("task");
        q.where_field("done").equal_to(false);
        q.set_limit(10);
        q
    };
    assert_eq!(build().cache_key().unwrap(), build().cache_key().unwrap());
}
