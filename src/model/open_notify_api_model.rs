use serde::{Deserialize, Deserializer, Serialize, de};

/// Body of `/astros.json`
#[derive(Debug, Deserialize, Serialize)]
pub struct AstrosResponse {
    pub people: Vec<CrewMember>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CrewMember {
    pub name: String,
    pub craft: String,
}

/// Body of `/iss-now.json`
#[derive(Debug, Deserialize, Serialize)]
pub struct IssNowResponse {
    pub iss_position: IssPosition,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct IssPosition {
    /// Sent as text, e.g. `"10.5"`
    #[serde(deserialize_with = "f64_from_text")]
    pub latitude: f64,
    /// Sent as text, e.g. `"-20.25"`
    #[serde(deserialize_with = "f64_from_text")]
    pub longitude: f64,
}

/// Body of `/iss-pass.json`
#[derive(Debug, Deserialize, Serialize)]
pub struct IssPassResponse {
    pub response: Vec<IssPass>,
}

/// A single predicted pass. Entries can come back partially filled, so every field is optional.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy)]
pub struct IssPass {
    #[serde(default)]
    pub risetime: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

// The position endpoint quotes its numbers
fn f64_from_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;

    s.trim()
        .parse::<f64>()
        .map_err(|e| de::Error::custom(format!("{s:?} is not a number: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn position_text_is_parsed_as_float() {
        let body = r#"{"iss_position":{"latitude":"10.5","longitude":"-20.25"},"message":"success"}"#;
        let now: IssNowResponse = serde_json::from_str(body).unwrap();

        assert_eq!(now.iss_position.latitude, "10.5".parse::<f64>().unwrap());
        assert_eq!(now.iss_position.longitude, -20.25);
    }

    #[test]
    fn position_text_matches_direct_parse() {
        let texts = [
            "10.5",
            "-20.25",
            "51.6416123",
            "-0.0",
            "0",
            "1e1",
            "-90",
            "180.0000",
            " 12.5 ",
            "-179.99999999",
        ];

        for text in texts {
            let body = json!({"iss_position": {"latitude": text, "longitude": text}});
            let now: IssNowResponse = serde_json::from_value(body).unwrap();
            let expected: f64 = text.trim().parse().unwrap();

            assert_eq!(now.iss_position.latitude.to_bits(), expected.to_bits(), "{text:?}");
            assert_eq!(now.iss_position.longitude.to_bits(), expected.to_bits(), "{text:?}");
        }
    }

    #[test]
    fn numeric_position_is_rejected() {
        let body = r#"{"iss_position":{"latitude":10.5,"longitude":"-20.25"}}"#;

        assert!(serde_json::from_str::<IssNowResponse>(body).is_err());
    }

    #[test]
    fn garbage_position_text_is_rejected() {
        let body = r#"{"iss_position":{"latitude":"north","longitude":"-20.25"}}"#;
        let err = serde_json::from_str::<IssNowResponse>(body).unwrap_err();

        assert!(err.to_string().contains("north"));
    }

    #[test]
    fn empty_pass_entries_are_accepted() {
        let body = r#"{"response":[{},{"risetime":0,"duration":540}]}"#;
        let passes: IssPassResponse = serde_json::from_str(body).unwrap();

        assert_eq!(passes.response.len(), 2);
        assert_eq!(passes.response[0].risetime, None);
        assert_eq!(passes.response[1].risetime, Some(0));
        assert_eq!(passes.response[1].duration, Some(540));
    }

    #[test]
    fn roster_keeps_order() {
        let body = r#"{"people":[{"name":"B","craft":"ISS"},{"name":"A","craft":"Tiangong"}],"number":2}"#;
        let astros: AstrosResponse = serde_json::from_str(body).unwrap();

        let names: Vec<_> = astros.people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
