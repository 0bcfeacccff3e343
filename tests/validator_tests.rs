use langmarkup::{Error, is_translation_valid};

struct Case {
    base: &'static str,
    translated: &'static str,
    locale: &'static str,
}

#[test]
fn test_same_structure_is_valid() {
    let cases = [
        ("test string", "тестовая строка"),
        ("test string <a>has node</a>", "тестовая строка <a>с нодой</a>"),
        ("test string %placeholder%", "тестовая строка %placeholder%"),
        (
            "test string <a>has <b>nested</b> node</a>",
            "тестовая строка <a>имеет <b>встроенную</b> ноду</a>",
        ),
        (
            "test string <a>has tag node</a>",
            "тестовая строка <a>имеет тэг ноду</a> и текстовую",
        ),
        ("<b>b node</b> <a>a node</a>", "<a>a нода</a> <b>b нода</b>"),
        ("cat <img/> float", "<img/> кот плавает"),
    ];

    for (base, translated) in cases {
        assert!(
            is_translation_valid(base, translated, "ru").unwrap(),
            "{base:?} vs {translated:?}"
        );
    }
}

#[test]
fn test_different_structure_is_invalid() {
    let cases = [
        ("test string <a>has node</a>", "тестовая строка <b>с нодой</b>"),
        ("test string %placeholder%", "тестовая строка %плейсхолдер%"),
        ("test string <a>has node</a>", "тестовая строка с нодой"),
        (
            "test string <a>has node</a>",
            "тестовая строка с нодой %placeholder%",
        ),
        ("cat <img/> float", "кот <img> плавает</img>"),
    ];

    for (base, translated) in cases {
        assert!(
            !is_translation_valid(base, translated, "ru").unwrap(),
            "{base:?} vs {translated:?}"
        );
    }
}

#[test]
fn test_valid_plural_forms() {
    let cases = [
        Case {
            base: "Traffic renews today | Traffic renews in %days% day | Traffic renews in %days% days",
            translated: "Veri bugün yenileniyor | Veri %days% gün içinde yenileniyor",
            locale: "tr",
        },
        Case {
            base: "| Create password, at least %count% character | Create password, at least %count% characters",
            translated: "| Créez un mot de passe, contenant au moins %count% caractère | Créez un mot de passe, contenant au moins %count% caractères",
            locale: "fr",
        },
        Case {
            base: "Traffic renews today | Traffic renews in %days% day | Traffic renews in %days% days",
            translated: "通信量は本日更新されます | 通信量は後%days%日で更新されます",
            locale: "ja",
        },
        Case {
            base: "No files | <b>%count%</b> file | <b>%count%</b> files",
            translated: "Нет файлов | <b>%count%</b> файл | <b>%count%</b> файла | <b>%count%</b> файлов",
            locale: "ru",
        },
    ];

    for case in cases {
        assert!(
            is_translation_valid(case.base, case.translated, case.locale).unwrap(),
            "{}: {}",
            case.locale,
            case.translated
        );
    }
}

#[test]
fn test_invalid_plural_form_structure() {
    let cases = [
        // zero form of the translation has a placeholder the base zero form lacks
        Case {
            base: "Traffic renews today | Traffic renews in %days% day | Traffic renews in %days% days",
            translated: "Veri %days% gün içinde yenileniyor | Veri %days% gün içinde yenileniyor",
            locale: "tr",
        },
        // plural form of the translation repeats the placeholder
        Case {
            base: "Traffic renews today | Traffic renews in %days% day | Traffic renews in %days% days",
            translated: "Veri bugün yenileniyor | Veri %days% gün %days% içinde yenileniyor",
            locale: "tr",
        },
    ];

    for case in cases {
        assert!(
            !is_translation_valid(case.base, case.translated, case.locale).unwrap(),
            "{}: {}",
            case.locale,
            case.translated
        );
    }
}

#[test]
fn test_wrong_plural_form_count_is_an_error() {
    let err = is_translation_valid(
        "Traffic renews today | Traffic renews in %days% day | Traffic renews in %days% days",
        "Veri bugün yenileniyor | Veri %days% gün içinde yenileniyor | Veri %days% gün içinde yenileniyor",
        "tr",
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidPluralForms { expected: 2, found: 3, .. }));
    assert!(err.to_string().contains("invalid plural forms"));
}

#[test]
fn test_unbalanced_translation_is_an_error() {
    let err = is_translation_valid(
        "An error occurred, please contact us via <a>support@example.com</a>",
        "Bir hata oluştu, lütfen <a>support@example.com<a> adresinden bizimle iletişime geçin",
        "tr",
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnbalancedTags(_)));
    assert!(err.to_string().contains("string has unbalanced tags"));
}

#[test]
fn test_attributes_in_translation_are_an_error() {
    let err = is_translation_valid("<a>link</a>", "<a href=\"#\">ссылка</a>", "ru").unwrap_err();
    assert!(matches!(err, Error::TagHasAttributes(_)));
}

#[test]
fn test_escaped_pipes_inside_plural_forms() {
    let base = r"Pay now \| later | Pay %count% item \| later | Pay %count% items \| later";
    assert!(
        is_translation_valid(
            base,
            r"Jetzt \| später | %count% Artikel \| später | %count% Artikel \| später",
            "de"
        )
        .unwrap()
    );
    assert!(is_translation_valid(base, r"Şimdi \| sonra | %count% öğe \| sonra", "tr").unwrap());

    let err = is_translation_valid(base, r"Şimdi \| sonra | %count% \| öğe | x", "tr").unwrap_err();
    assert_eq!(
        err,
        Error::InvalidPluralForms {
            locale: "tr".to_string(),
            expected: 2,
            found: 3,
        }
    );
}
