use serde_json::Value;

use crate::inventory::fetch_error::FetchError;
use crate::types::item::Item;
use crate::types::serial::Serial;

/* body, front and back views exist upstream as well; only one angle is collected */
const IMAGE_VIEWS: &[&str] = &["angle"];
const IMAGE_SIZE: &str = "750";

/// Parses a `format=serialcompare` product detail body into one item per listed serial.
pub fn parse_product_detail(
    product_id: &str,
    origin: &str,
    body: &str,
) -> Result<Vec<Item>, FetchError> {
    let parsed: Value = serde_json::from_str(body).map_err(|source| FetchError::Parse {
        product_id: product_id.to_string(),
        source,
    })?;

    extract_items(&parsed, origin).map_err(|reason| FetchError::Extraction {
        product_id: product_id.to_string(),
        reason,
    })
}

fn extract_items(detail: &Value, origin: &str) -> Result<Vec<Item>, String> {
    let name = field(detail, &["productName"])?
        .as_str()
        .ok_or("productName is not a string")?;

    let serials = field(detail, &["comparableSerials"])?
        .as_array()
        .ok_or("comparableSerials is not an array")?;

    serials
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            extract_item(name, entry, origin)
                .map_err(|reason| format!("comparableSerials[{index}]: {reason}"))
        })
        .collect()
}

fn extract_item(name: &str, entry: &Value, origin: &str) -> Result<Item, String> {
    let serial = parse_serial(field(entry, &["serialNumber", "number"])?)?;

    let serial_url = field(entry, &["serialUrl"])?
        .as_str()
        .ok_or("serialUrl is not a string")?;

    let images = IMAGE_VIEWS
        .iter()
        .map(|&view| {
            field(entry, &["images", view, "images", IMAGE_SIZE, "absolutePath"])?
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| {
                    format!("images.{view}.images.{IMAGE_SIZE}.absolutePath is not a string")
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Item::new(name, serial, format!("{origin}{serial_url}"), images))
}

fn parse_serial(value: &Value) -> Result<Serial, String> {
    match value {
        Value::String(text) => text
            .parse::<Serial>()
            .map_err(|e| format!("serialNumber.number \"{text}\" is not a serial: {e}")),
        Value::Number(number) => number
            .as_u64()
            .map(Serial::new)
            .ok_or_else(|| format!("serialNumber.number {number} is not a serial")),
        other => Err(format!("serialNumber.number has unexpected type: {other}")),
    }
}

fn field<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, String> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        current = current
            .get(key)
            .ok_or_else(|| format!("missing key {}", path[..=depth].join(".")))?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.sweetwater.com";

    fn entry(number: Value, path: &str, image: &str) -> Value {
        serde_json::json!({
            "serialNumber": { "number": number },
            "serialUrl": path,
            "images": {
                "angle": { "images": { "750": { "absolutePath": image } } },
                "front": { "images": { "750": { "absolutePath": "/img/front.jpg" } } }
            }
        })
    }

    #[test]
    fn parses_single_serial() {
        let body = serde_json::json!({
            "productName": "Les Paul",
            "comparableSerials": [entry("123".into(), "/p/123", "/img/123.jpg")]
        })
        .to_string();

        let items = parse_product_detail("LPS", ORIGIN, &body).unwrap();

        assert_eq!(
            items,
            vec![Item::new(
                "Les Paul",
                Serial::new(123),
                "https://www.sweetwater.com/p/123",
                vec!["/img/123.jpg".to_string()],
            )]
        );
    }

    #[test]
    fn accepts_numeric_serials() {
        let body = serde_json::json!({
            "productName": "SG",
            "comparableSerials": [
                entry(41.into(), "/p/41", "/img/41.jpg"),
                entry("42".into(), "/p/42", "/img/42.jpg")
            ]
        })
        .to_string();

        let items = parse_product_detail("SG", ORIGIN, &body).unwrap();
        let serials: Vec<u64> = items.iter().map(|i| i.serial.as_u64()).collect();

        assert_eq!(serials, vec![41, 42]);
        assert!(items.iter().all(|i| i.images.len() == 1));
    }

    #[test]
    fn empty_serial_list_yields_no_items() {
        let body = r#"{"productName": "SG", "comparableSerials": []}"#;

        assert!(parse_product_detail("SG", ORIGIN, body).unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = parse_product_detail("SG", ORIGIN, "<html>403</html>").unwrap_err();

        assert!(matches!(error, FetchError::Parse { ref product_id, .. } if product_id == "SG"));
    }

    #[test]
    fn missing_name_is_an_extraction_error() {
        let error = parse_product_detail("SG", ORIGIN, r#"{"comparableSerials": []}"#).unwrap_err();

        match error {
            FetchError::Extraction { reason, .. } => assert!(reason.contains("productName")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_angle_image_names_the_path() {
        let body = serde_json::json!({
            "productName": "SG",
            "comparableSerials": [{
                "serialNumber": { "number": "1" },
                "serialUrl": "/p/1",
                "images": { "front": { "images": { "750": { "absolutePath": "/f.jpg" } } } }
            }]
        })
        .to_string();

        match parse_product_detail("SG", ORIGIN, &body).unwrap_err() {
            FetchError::Extraction { reason, .. } => {
                assert!(reason.contains("comparableSerials[0]"));
                assert!(reason.contains("images.angle"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_serial_is_an_extraction_error() {
        let body = serde_json::json!({
            "productName": "SG",
            "comparableSerials": [entry("AB12".into(), "/p/x", "/img/x.jpg")]
        })
        .to_string();

        assert!(matches!(
            parse_product_detail("SG", ORIGIN, &body),
            Err(FetchError::Extraction { .. })
        ));
    }

    #[test]
    fn negative_serials_are_extraction_errors() {
        for number in [Value::from("-5"), Value::from(-5)] {
            let body = serde_json::json!({
                "productName": "SG",
                "comparableSerials": [entry(number, "/p/x", "/img/x.jpg")]
            })
            .to_string();

            let error = parse_product_detail("SG", ORIGIN, &body).unwrap_err();
            assert!(
                error.to_string().contains("is not a serial"),
                "unexpected error: {error}"
            );
        }
    }
}
