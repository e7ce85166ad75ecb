use std::collections::BTreeMap;

use serde::Deserialize;

use geoposts_types::validate::{
    LOCATION_DESCRIPTION_MAX, POST_TITLE_MAX, check_max_len, check_required, parse_latitude,
    parse_longitude,
};

/// Field name to the first error message for that field.
pub type FieldErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewLocationForm {
    pub coord_latitude: String,
    pub coord_longitude: String,
    pub description: String,
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

impl NewLocationForm {
    pub fn validate(&self) -> Result<ValidLocation, FieldErrors> {
        let mut errors = FieldErrors::new();

        let description = self.description.trim();
        if let Err(e) =
            check_required(description).and_then(|_| check_max_len(description, LOCATION_DESCRIPTION_MAX))
        {
            errors.insert("description", e.to_string());
        }

        let latitude = parse_latitude(&self.coord_latitude)
            .map_err(|e| errors.insert("coord_latitude", e.to_string()))
            .ok();
        let longitude = parse_longitude(&self.coord_longitude)
            .map_err(|e| errors.insert("coord_longitude", e.to_string()))
            .ok();

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if errors.is_empty() => Ok(ValidLocation {
                latitude,
                longitude,
                description: description.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidPost {
    pub title: String,
    pub content: String,
}

impl NewPostForm {
    pub fn validate(&self) -> Result<ValidPost, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if let Err(e) = check_required(title).and_then(|_| check_max_len(title, POST_TITLE_MAX)) {
            errors.insert("title", e.to_string());
        }
        if let Err(e) = check_required(&self.content) {
            errors.insert("content", e.to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidPost {
            title: title.to_string(),
            content: self.content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_form(lat: &str, lng: &str, description: &str) -> NewLocationForm {
        NewLocationForm {
            coord_latitude: lat.into(),
            coord_longitude: lng.into(),
            description: description.into(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn valid_location_form() {
        let valid = location_form("52.516247", "13.377711", " Brandenburger Tor ")
            .validate()
            .unwrap();
        assert_eq!(
            valid,
            ValidLocation {
                latitude: 52.516247,
                longitude: 13.377711,
                description: "Brandenburger Tor".into(),
            }
        );
    }

    #[test]
    fn location_form_reports_every_field() {
        let errors = location_form("north", "200", "").validate().unwrap_err();
        assert_eq!(errors["coord_latitude"], "Not a valid number.");
        assert_eq!(errors["coord_longitude"], "Number must be between -180 and 180.");
        assert_eq!(errors["description"], "This field is required.");
    }

    #[test]
    fn location_description_limit() {
        let long = "x".repeat(81);
        let errors = location_form("1", "1", &long).validate().unwrap_err();
        assert_eq!(errors["description"], "Field must be at most 80 characters long.");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn post_form_rules() {
        let ok = NewPostForm {
            title: "Hello".into(),
            content: "World".into(),
            csrf_token: String::new(),
        };
        assert!(ok.validate().is_ok());

        let bad = NewPostForm {
            title: "t".repeat(101),
            content: "  ".into(),
            csrf_token: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors["title"], "Field must be at most 100 characters long.");
        assert_eq!(errors["content"], "This field is required.");
    }
}
