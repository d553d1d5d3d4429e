use modal_field_mapper::{
    cache_field_mappings, cached_field_mappings, resolve, scan_modal_fields, DataType, Element,
    FieldKind, FieldMapping, InputType, Node, Validation,
};
use pretty_assertions::assert_eq;

fn fixture() -> Element {
    Element::parse(include_str!("fixtures/plano_aula_modal.xhtml")).expect("fixture parses")
}

#[test]
fn maps_lesson_plan_modal() {
    let fields = scan_modal_fields(&fixture());

    let expected = vec![
        FieldMapping::new("titulo", "#titulo", FieldKind::NativeInput, DataType::String)
            .input_type(InputType::Text)
            .required(true),
        FieldMapping::new("email", "#email", FieldKind::NativeInput, DataType::String)
            .input_type(InputType::Email)
            .validation(Validation::email()),
        FieldMapping::new("carga_horria", ".w-full", FieldKind::NativeInput, DataType::Number)
            .input_type(InputType::Number)
            .required(true),
        FieldMapping::new(
            "tema_principal",
            "input:nth-of-type(1)",
            FieldKind::NativeInput,
            DataType::String,
        )
        .input_type(InputType::Text),
        FieldMapping::new(
            "objetivos",
            "[name=\"objetivos\"]",
            FieldKind::NativeTextarea,
            DataType::String,
        ),
        FieldMapping::new("grade", "#grade", FieldKind::NativeSelect, DataType::String)
            .options(["A", "B", "C"]),
        FieldMapping::new(
            "nvel_de_dificuldade",
            ".btn-group",
            FieldKind::ButtonGroup,
            DataType::String,
        )
        .required(true)
        .options(["Fácil", "Médio", "Difícil"]),
        FieldMapping::new(
            "disciplinas",
            ".multi-select",
            FieldKind::MultiSelectMarker,
            DataType::ArrayOfString,
        ),
        FieldMapping::new(
            "competncias_bncc",
            ".checkbox-list",
            FieldKind::CheckboxList,
            DataType::ArrayOfString,
        )
        .options(["Leitura", "Escrita", "ef03"]),
    ];

    assert_eq!(fields, expected);
}

#[test]
fn rescanning_is_idempotent() {
    let modal = fixture();
    assert_eq!(scan_modal_fields(&modal), scan_modal_fields(&modal));
}

#[test]
fn id_wins_over_associated_label() {
    let modal = Element::parse(
        r#"<div><label for="email">E-mail do aluno</label><input id="email" type="email"/></div>"#,
    )
    .unwrap();

    let fields = scan_modal_fields(&modal);
    assert_eq!(fields.len(), 1);
    let field = &fields[0];
    assert_eq!(field.name, "email");
    assert_eq!(field.selector, "#email");
    assert_eq!(field.kind, FieldKind::NativeInput);
    assert_eq!(field.data_type, DataType::String);
    assert_eq!(field.validation, Some(Validation::email()));
    assert!(!field.required);
}

#[test]
fn select_drops_empty_option() {
    let modal = Element::parse(
        r#"<div><select id="grade"><option></option><option>A</option><option>B</option><option>C</option></select></div>"#,
    )
    .unwrap();

    let fields = scan_modal_fields(&modal);
    assert_eq!(fields[0].options, Some(vec!["A".to_string(), "B".to_string(), "C".to_string()]));
}

#[test]
fn select_options_keep_document_order() {
    let modal = Element::parse(
        r#"<div><select name="turma">
            <option value="3">Terceiro ano</option>
            <option value="1">Primeiro ano</option>
            <option value="2"></option>
        </select></div>"#,
    )
    .unwrap();

    let options = scan_modal_fields(&modal)[0].options.clone().unwrap();
    assert_eq!(options, ["Terceiro ano", "Primeiro ano", "2"]);
}

#[test]
fn id_selectors_resolve_to_their_element_only() {
    let modal = fixture();
    for field in scan_modal_fields(&modal) {
        let Some(id) = field.selector.strip_prefix('#') else {
            continue;
        };
        let found = resolve(&modal, &field.selector).unwrap();
        assert_eq!(found.len(), 1, "{} resolved {} elements", field.selector, found.len());
        assert_eq!(found[0].attribute("id"), Some(id));
    }
}

#[test]
fn sibling_inputs_get_distinct_positional_selectors() {
    let modal = Element::parse(
        r#"<div><input placeholder="Primeiro nome"/><input placeholder="Sobrenome"/></div>"#,
    )
    .unwrap();

    let fields = scan_modal_fields(&modal);
    assert_eq!(fields.len(), 2);
    assert_ne!(fields[0].selector, fields[1].selector);

    for (field, placeholder) in fields.iter().zip(["Primeiro nome", "Sobrenome"]) {
        let found = resolve(&modal, &field.selector).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attribute("placeholder"), Some(placeholder));
    }
}

#[test]
fn checkbox_container_becomes_one_list_field() {
    let modal = Element::parse(
        r#"<div>
            <label>Recursos</label>
            <div role="group">
                <input type="checkbox" value="projetor"/><label>Projetor</label>
                <input type="checkbox" value="lousa"/><label>Lousa</label>
                <input type="checkbox" value=""/><label> </label>
            </div>
        </div>"#,
    )
    .unwrap();

    let lists: Vec<_> = scan_modal_fields(&modal)
        .into_iter()
        .filter(|field| field.kind == FieldKind::CheckboxList)
        .collect();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "recursos");
    assert_eq!(lists[0].data_type, DataType::ArrayOfString);
    assert_eq!(lists[0].options.as_ref().map(Vec::len), Some(2));
    assert!(!lists[0].required);
}

#[test]
fn named_checkboxes_inside_a_list_are_reported_twice() {
    let modal = Element::parse(
        r#"<div>
            <div class="checkbox-list" data-field="turnos">
                <input type="checkbox" name="manha"/><span>Manhã</span>
                <input type="checkbox" name="tarde"/><span>Tarde</span>
            </div>
        </div>"#,
    )
    .unwrap();

    let summary: Vec<_> = scan_modal_fields(&modal)
        .into_iter()
        .map(|field| (field.name, field.kind, field.data_type))
        .collect();
    assert_eq!(
        summary,
        [
            ("manha".to_string(), FieldKind::NativeInput, DataType::Boolean),
            ("tarde".to_string(), FieldKind::NativeInput, DataType::Boolean),
            ("turnos".to_string(), FieldKind::CheckboxList, DataType::ArrayOfString),
        ]
    );
}

#[test]
fn scan_results_round_trip_through_cache() {
    let fields = scan_modal_fields(&fixture());
    cache_field_mappings("plano-aula", fields.clone());

    assert_eq!(cached_field_mappings("plano-aula"), Some(fields));
    assert_eq!(cached_field_mappings("never-scanned"), None);
}
