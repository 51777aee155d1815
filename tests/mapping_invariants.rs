//! Whole-pipeline checks for the §8 invariants, driven through the real
//! extractor and shadow synthesiser rather than hand-built `Mapping`
//! fixtures.

use aurelia::base::{TextSize, ViewId};
use aurelia::index::ComponentIndex;
use aurelia::shadow::{self, ShadowSynthesiser};

fn synthesise(html: &str, members: &[&str]) -> aurelia::model::ViewMappings {
    let index = ComponentIndex::new();
    let mut synthesiser = ShadowSynthesiser::new();
    synthesiser.synthesise_view(
        ViewId::new(0),
        &aurelia::base::Uri::new("a.html"),
        "AppViewModel".into(),
        "app.ts".into(),
        html.to_string(),
        members.iter().map(|m| (*m).into()).collect(),
        &index,
    )
}

#[test]
fn mappings_are_sorted_and_pairwise_disjoint() {
    let view = synthesise(
        "<p>${greeting}</p><input value.bind=\"name\">",
        &["greeting", "name"],
    );
    assert_eq!(view.mappings.len(), 2);
    for pair in view.mappings.windows(2) {
        assert!(pair[0].shadow_block_range.end() <= pair[1].shadow_block_range.start());
    }
}

#[test]
fn transformations_stay_inside_their_mapping_bounds() {
    let view = synthesise("<p>${message}</p>", &["message"]);
    let mapping = &view.mappings[0];
    for t in &mapping.transformations {
        assert!(mapping.shadow_value_range.contains_range(t.shadow_range));
        assert!(mapping.expression.html_span.contains_range(t.html_range));
    }
}

#[test]
fn forward_then_inverse_contains_every_offset_strictly_inside_the_expression() {
    // §8 invariant 3 is scoped to offsets *strictly* inside the
    // expression; the boundary offset (the very first byte) lands in the
    // `_this.` prefix rather than inside the identifier's own
    // transformation and is covered by the "natural token range" case
    // below instead.
    let view = synthesise("<p>${message}</p>", &["message"]);
    let mapping = &view.mappings[0];
    let span = mapping.expression.html_span;
    for o in (u32::from(span.start()) + 1)..u32::from(span.end()) {
        let offset = TextSize::new(o);
        let shadow_offset = shadow::forward(mapping, offset);
        let back = shadow::inverse(mapping, aurelia::base::range(
            usize::from(shadow_offset),
            usize::from(shadow_offset),
        ))
        .expect("a point inverse should always resolve inside the expression");
        assert!(back.contains(offset), "offset {o} mapped back to {back:?}");
    }
}

#[test]
fn empty_interpolation_forward_lands_one_past_shadow_value_start() {
    let view = synthesise("<p>${}</p>", &[]);
    let mapping = &view.mappings[0];
    let start = mapping.expression.html_span.start();
    let shadow_offset = shadow::forward(mapping, start);
    assert_eq!(shadow_offset, mapping.shadow_value_range.start() + TextSize::from(1));
}

#[test]
fn inverse_of_a_span_inside_a_transformation_equals_its_html_range() {
    let view = synthesise("<p>${message}</p>", &["message"]);
    let mapping = &view.mappings[0];
    let t = mapping.transformations.first().expect("member-of-this rewrite expected");
    let html_range = shadow::inverse(mapping, t.shadow_range).unwrap();
    assert_eq!(html_range, t.html_range);
}

#[test]
fn shadow_version_increases_only_when_the_shadow_actually_changes() {
    let mut synthesiser = ShadowSynthesiser::new();
    let index = ComponentIndex::new();
    let uri = aurelia::base::Uri::new("a.html");

    let first = synthesiser.synthesise_view(
        ViewId::new(7),
        &uri,
        "AppViewModel".into(),
        "app.ts".into(),
        "<p>${message}</p>".to_string(),
        vec!["message".into()],
        &index,
    );
    let unchanged = synthesiser.synthesise_view(
        ViewId::new(7),
        &uri,
        "AppViewModel".into(),
        "app.ts".into(),
        "<p>${message}</p>".to_string(),
        vec!["message".into()],
        &index,
    );
    assert_eq!(first.shadow_version, unchanged.shadow_version);

    let edited = synthesiser.synthesise_view(
        ViewId::new(7),
        &uri,
        "AppViewModel".into(),
        "app.ts".into(),
        "<p>${message} ${other}</p>".to_string(),
        vec!["message".into(), "other".into()],
        &index,
    );
    assert!(edited.shadow_version > unchanged.shadow_version);
}

#[test]
fn boundary_empty_attribute_value_forward_is_shadow_value_start() {
    let view = synthesise(r#"<input value.bind="">"#, &[]);
    let mapping = &view.mappings[0];
    let offset = mapping.expression.html_span.start();
    let shadow_offset = shadow::forward(mapping, offset);
    assert_eq!(shadow_offset, mapping.shadow_value_range.start());
}

#[test]
fn boundary_pipe_with_spaces_keeps_base_transformed_and_suffix_verbatim() {
    let index = ComponentIndex::new();
    index.update_for_file(
        &aurelia::base::Uri::new("fmt.ts"),
        "@valueConverter('fmt')\nexport class Fmt {}\n",
    );
    let mut synthesiser = ShadowSynthesiser::new();
    let view = synthesiser.synthesise_view(
        ViewId::new(0),
        &aurelia::base::Uri::new("a.html"),
        "AppViewModel".into(),
        "app.ts".into(),
        "<p>${name | fmt : 2}</p>".to_string(),
        vec!["name".into()],
        &index,
    );
    assert!(view.shadow_text.contains("_this.name | fmt : 2"));
    assert!(view.shadow_text.contains("declare function fmt(value: any, ...args: any[]): any;"));
}

#[test]
fn boundary_identifier_equal_to_this_is_not_rewritten() {
    let view = synthesise("<p>${this}</p>", &[]);
    assert!(view.mappings[0].transformations.is_empty());
}
