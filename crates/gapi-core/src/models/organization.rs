use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Org {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Reply to org create, update, and delete calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgResponse {
    #[serde(rename = "orgId")]
    pub id: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Request body for org create/update. `external_id` is left out when unset.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OrgForm<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_org_with_and_without_external_id() {
        let org: Org = serde_json::from_str(r#"{"id":3,"name":"Ops","external_id":"ext-3"}"#)
            .expect("Failed to parse org");
        assert_eq!(org.external_id.as_deref(), Some("ext-3"));

        let org: Org = serde_json::from_str(r#"{"id":1,"name":"Main Org.","address":{}}"#)
            .expect("Failed to parse org");
        assert_eq!(org.name, "Main Org.");
        assert_eq!(org.external_id, None);
    }

    #[test]
    fn test_org_response_reads_org_id() {
        let json = r#"{"orgId":7,"message":"Organization created"}"#;
        let resp: OrgResponse = serde_json::from_str(json).expect("Failed to parse org response");
        assert_eq!(resp.id, 7);
        assert_eq!(resp.message, "Organization created");
    }

    #[test]
    fn test_org_form_omits_missing_external_id() {
        let form = OrgForm { name: "Ops", external_id: None };
        assert_eq!(serde_json::to_string(&form).unwrap(), r#"{"name":"Ops"}"#);

        let form = OrgForm { name: "Ops", external_id: Some("x") };
        assert_eq!(
            serde_json::to_string(&form).unwrap(),
            r#"{"name":"Ops","external_id":"x"}"#
        );
    }
}
