use quick_xml::events::Event;

use crate::{City, error::ParseError, xml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Name,
    Country,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"woeid" => Some(Field::Id),
            b"name" => Some(Field::Name),
            b"country" => Some(Field::Country),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Field::Id => "woeid",
            Field::Name => "name",
            Field::Country => "country",
        }
    }
}

/// Collect one [`City`] per `<place>` block, in document order.
pub(super) fn parse(data: &str) -> Result<Vec<City>, ParseError> {
    let mut reader = xml::reader(data);
    let mut cities = Vec::new();
    let mut city: Option<City> = None;
    let mut field: Option<Field> = None;
    let mut nesting = xml::Nesting::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name();
                if name.as_ref() == b"place" {
                    city = Some(City::default());
                }
                field = Field::from_tag(name.as_ref());
                nesting.enter(name.as_ref());
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"place" {
                    cities.push(City::default());
                }
            }
            Event::Text(text) => {
                let Some(field) = field else { continue };
                assign(&mut city, field, xml::text(&text)?)?;
            }
            Event::CData(cdata) => {
                let Some(field) = field else { continue };
                assign(&mut city, field, xml::cdata(&cdata))?;
            }
            Event::End(e) => {
                if e.name().as_ref() == b"place" {
                    cities.extend(city.take());
                }
                field = None;
                nesting.leave();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    nesting.finish()?;
    Ok(cities)
}

fn assign(city: &mut Option<City>, field: Field, value: String) -> Result<(), ParseError> {
    let city = city
        .as_mut()
        .ok_or(ParseError::OrphanText { field: field.tag() })?;

    match field {
        Field::Id => city.id = value,
        Field::Name => city.name = value,
        Field::Country => city.country = value,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACES: &str = include_str!("../../../tests/fixtures/places.xml");

    #[test]
    fn one_city_per_place_in_document_order() {
        let cities = parse(PLACES).expect("valid document");

        assert_eq!(
            cities,
            vec![
                City {
                    id: "2502265".into(),
                    name: "New York".into(),
                    country: "US".into(),
                },
                City {
                    id: "44418".into(),
                    name: "London".into(),
                    country: "GB".into(),
                },
            ]
        );
    }

    #[test]
    fn empty_result_set_yields_no_cities() {
        let cities = parse(r#"<places yahoo:count="0"></places>"#).expect("valid document");
        assert!(cities.is_empty());
    }

    #[test]
    fn nested_elements_do_not_leak_into_fields() {
        let data = r#"<places><place>
            <woeid>12591</woeid>
            <admin1 code="IT-LZ">Lazio</admin1>
            <name>Rome</name>
            <centroid><latitude>41.9</latitude></centroid>
            <country code="IT">IT</country>
        </place></places>"#;

        let cities = parse(data).expect("valid document");
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].id, "12591");
        assert_eq!(cities[0].name, "Rome");
        assert_eq!(cities[0].country, "IT");
    }

    #[test]
    fn field_text_without_a_place_fails() {
        let err = parse("<places><name>Nowhere</name></places>").unwrap_err();
        assert!(matches!(err, ParseError::OrphanText { field: "name" }));
    }

    #[test]
    fn mismatched_tags_fail() {
        let err = parse("<places><place><name>Rome</woeid></place></places>").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn unterminated_place_fails() {
        let err = parse("<places><place><name>Rome</name>").unwrap_err();
        assert!(matches!(err, ParseError::Unclosed(ref name) if name == "place"));
    }

    #[test]
    fn unterminated_root_fails_after_complete_places() {
        let data = "<places><place><woeid>1</woeid><name>Rome &amp; Co</name></place>";
        let err = parse(data).unwrap_err();
        assert!(matches!(err, ParseError::Unclosed(ref name) if name == "places"));
    }

    #[test]
    fn cdata_field_values_are_kept() {
        let data = "<places><place><woeid>12724717</woeid>\
            <name><![CDATA[Saint-Étienne]]></name>\
            <country><![CDATA[FR]]></country></place></places>";

        let cities = parse(data).expect("valid document");
        assert_eq!(
            cities,
            vec![City {
                id: "12724717".into(),
                name: "Saint-Étienne".into(),
                country: "FR".into(),
            }]
        );
    }
}
