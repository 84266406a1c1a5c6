use form_metadata_sharing::*;

pub const DRUG_ORDER_FORM: &str = r#"<htmlform formName="Outpatient Prescriptions">
    <h2>Prescriptions</h2>
    <drugOrder>
        <orderProperty name="drug">
            <option value="1" label="Aspirin 81mg"/>
            <option value="aspirin-uuid" label="Aspirin (baby)"/>
        </orderProperty>
        <orderProperty name="careSetting" value="1"/>
        <orderProperty name="route">
            <option value="123" label="Oral"/>
            <option value="" label="None"/>
        </orderProperty>
        <orderProperty name="frequency">
            <option value="OD" label="Once daily"/>
        </orderProperty>
        <orderProperty name="dosingType" value="SIMPLE">
            <option value="SIMPLE"/>
        </orderProperty>
    </drugOrder>
</htmlform>"#;

#[allow(dead_code)]
pub fn aspirin() -> Entity {
    Entity::new(EntityType::Drug, "aspirin-uuid")
        .with_id(1)
        .with_name("Aspirin")
}

#[allow(dead_code)]
pub fn oral() -> Entity {
    Entity::new(EntityType::Concept, "oral-uuid")
        .with_id(123)
        .with_name("Oral")
}

#[allow(dead_code)]
pub fn outpatient() -> Entity {
    Entity::new(EntityType::CareSetting, "outpatient-uuid").with_id(1)
}

#[allow(dead_code)]
pub fn once_daily() -> Entity {
    Entity::new(EntityType::OrderFrequency, "od-uuid").with_name("OD")
}

#[allow(dead_code)]
pub fn create_test_catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with(aspirin())
        .with(oral())
        .with(outpatient())
        .with(once_daily())
}

/// Maps every catalog entity to a `target-` prefixed uuid.
#[allow(dead_code)]
pub fn create_test_map() -> SubstitutionMap {
    [aspirin(), oral(), outpatient(), once_daily()]
        .into_iter()
        .fold(SubstitutionMap::new(), |map, source| {
            let target = Entity::new(source.entity_type, format!("target-{}", source.uuid));
            map.with(source, target)
        })
}

#[allow(dead_code)]
pub fn create_test_descriptor() -> DrugOrderTagDescriptor {
    DrugOrderTagDescriptor::new(TagSchemaResolver::new(create_test_catalog()))
}

#[allow(dead_code)]
pub fn option_values(xml: &str) -> Vec<String> {
    let document = Document::parse(xml).unwrap();
    let mut values = Vec::new();
    collect_option_values(document.root().unwrap(), &mut values);
    values
}

#[allow(dead_code)]
fn collect_option_values(node: &Node, values: &mut Vec<String>) {
    if node.is_named("option") {
        if let Some(value) = node.attribute("value") {
            values.push(value.to_string());
        }
    }
    for child in &node.children {
        collect_option_values(child, values);
    }
}
