use super::*;

fn fields(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn feminine_with_name() {
    let values = fields(&[
        ("nome", "Ana"),
        ("genero", "feminino"),
        ("msg", "Parabéns {ao} {colaborador} {nome}!"),
    ]);
    let defaults = FieldValues::new();
    let text = TextResolver::new(&values, &defaults);
    assert_eq!(text.resolve("msg"), "Parabéns a colaboradora Ana!");
}

#[test]
fn masculine_with_blank_name_uses_placeholder() {
    let values = fields(&[
        ("nome", "   "),
        ("genero", " M "),
        ("msg", "{seu} chefe chamou {do} RH: {nome} ({genero})"),
    ]);
    let defaults = FieldValues::new();
    let text = TextResolver::new(&values, &defaults);
    assert_eq!(text.resolve("msg"), "seu chefe chamou do RH: Fulano (masculino)");
}

#[test]
fn values_fall_back_to_defaults_then_empty() {
    let values = fields(&[("title", "Agora")]);
    let defaults = fields(&[("title", "Antes"), ("body", "Olá {nome}")]);
    let text = TextResolver::new(&values, &defaults);
    assert_eq!(text.resolve("title"), "Agora");
    assert_eq!(text.resolve("body"), "Olá Fulano");
    assert_eq!(text.resolve("missing"), "");
}

#[test]
fn unknown_tokens_vanish_and_other_braces_stay() {
    let table = TokenTable::new("Bia", Gender::Feminine);
    assert_eq!(table.interpolate("{x} {nome} {a-b} {}"), " Bia {a-b} {}");
    assert_eq!(table.interpolate("sem chaves"), "sem chaves");
}

#[test]
fn gender_parsing_defaults_to_feminine() {
    for raw in ["masculino", "MASC", "m", " Masculino "] {
        assert_eq!(Gender::from_field(raw), Gender::Masculine, "{raw}");
    }
    for raw in ["", "f", "feminino", "outro", "mas"] {
        assert_eq!(Gender::from_field(raw), Gender::Feminine, "{raw}");
    }
}

#[test]
fn name_is_trimmed() {
    let table = TokenTable::new("  Carla ", Gender::Feminine);
    assert_eq!(table.get("nome"), Some("Carla"));
    assert_eq!(table.get("genero"), Some("feminino"));
}

#[test]
fn congratulation_line_agrees_with_gender() {
    let defaults = fields(&[("msg", "Parabéns {nome}, você é {ao} melhor {colaborador}!")]);

    let ana = fields(&[("nome", "Ana"), ("genero", "feminino")]);
    assert_eq!(
        TextResolver::new(&ana, &defaults).resolve("msg"),
        "Parabéns Ana, você é a melhor colaboradora!"
    );

    let blank = fields(&[("nome", ""), ("genero", "masculino")]);
    assert_eq!(
        TextResolver::new(&blank, &defaults).resolve("msg"),
        "Parabéns Fulano, você é o melhor colaborador!"
    );
}
