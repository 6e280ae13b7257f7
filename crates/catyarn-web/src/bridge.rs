use catyarn_core::CatYarnConfig;

/// Parse the JSON form of the host's config object.
///
/// `undefined`/`null` (serialized as an empty string or `null`) means "all
/// defaults".
pub fn parse_config(json: &str) -> Result<CatYarnConfig, String> {
    let trimmed = json.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(CatYarnConfig::default());
    }
    CatYarnConfig::from_json_str(trimmed).map_err(|e| e.to_string())
}

/// Convert the JS config object handed to `mount` into a validated config.
#[cfg(target_family = "wasm")]
pub fn config_from_js(value: &wasm_bindgen::JsValue) -> Result<CatYarnConfig, String> {
    if value.is_undefined() || value.is_null() {
        return Ok(CatYarnConfig::default());
    }
    if let Some(s) = value.as_string() {
        return parse_config(&s);
    }
    let json = js_sys::JSON::stringify(value)
        .map_err(|e| format!("config is not serializable: {e:?}"))?;
    parse_config(&String::from(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catyarn_core::HideBelow;

    #[test]
    fn empty_means_defaults() {
        assert_eq!(parse_config("").unwrap(), CatYarnConfig::default());
        assert_eq!(parse_config(" null ").unwrap(), CatYarnConfig::default());
        assert_eq!(parse_config("{}").unwrap(), CatYarnConfig::default());
    }

    #[test]
    fn host_page_props_parse() {
        let cfg = parse_config(
            r##"{"catSrc":"/cat.png","catWidth":180,"color":"#b45f41","hideBelow":"xl"}"##,
        )
        .unwrap();
        assert_eq!(cfg.cat_src, "/cat.png");
        assert_eq!(cfg.hide_below, HideBelow::Xl);
    }

    #[test]
    fn invalid_config_reports_reason() {
        let err = parse_config(r#"{"catWidth": -5}"#).unwrap_err();
        assert!(err.contains("cat_width"), "err = {err}");

        let err = parse_config("[1, 2]").unwrap_err();
        assert!(err.starts_with("config parse error"), "err = {err}");
    }
}
