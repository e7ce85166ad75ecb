use maud::{DOCTYPE, Markup, PreEscaped, html};

use geoposts_types::api::LocationDict;

use crate::forms::{FieldErrors, NewLocationForm, NewPostForm};
use crate::session::Flash;

/// Map centre used when nothing else is known.
const DEFAULT_CENTER: (f64, f64) = (52.516247, 13.377711);

const MAP_SCRIPT: &str = r#"
function initMap() {
  const el = document.getElementById("map");
  const center = { lat: parseFloat(el.dataset.lat), lng: parseFloat(el.dataset.lng) };
  const map = new google.maps.Map(el, { center: center, zoom: 12 });
  const markers = [];

  map.addListener("idle", () => {
    const c = map.getCenter();
    const ne = map.getBounds().getNorthEast();
    const radius = Math.ceil(google.maps.geometry.spherical.computeDistanceBetween(c, ne));
    const url = `/api/get_items_in_radius?lat=${c.lat()}&lng=${c.lng()}&radius=${radius}`;
    fetch(url)
      .then((res) => res.json())
      .then((body) => {
        markers.forEach((m) => m.setMap(null));
        markers.length = 0;
        (body.results || []).forEach((item) => {
          const marker = new google.maps.Marker({
            position: item.location,
            map: map,
            title: item.description || "",
          });
          marker.addListener("click", () => {
            window.location.href = `/detail?id=${encodeURIComponent(item.id)}`;
          });
          markers.push(marker);
        });
      });
  });
}
"#;

const DETAIL_SCRIPT: &str = r#"
function initMap() {
  const el = document.getElementById("map");
  const position = { lat: parseFloat(el.dataset.lat), lng: parseFloat(el.dataset.lng) };
  const map = new google.maps.Map(el, { center: position, zoom: 15 });
  new google.maps.Marker({ position: position, map: map });
}
"#;

const PICKER_SCRIPT: &str = r#"
function initMap() {
  const el = document.getElementById("map");
  const lat = document.getElementById("coord_latitude");
  const lng = document.getElementById("coord_longitude");
  const start = lat.value && lng.value
    ? { lat: parseFloat(lat.value), lng: parseFloat(lng.value) }
    : { lat: parseFloat(el.dataset.lat), lng: parseFloat(el.dataset.lng) };
  const map = new google.maps.Map(el, { center: start, zoom: 12 });
  let marker = lat.value && lng.value ? new google.maps.Marker({ position: start, map: map }) : null;

  map.addListener("click", (e) => {
    lat.value = e.latLng.lat();
    lng.value = e.latLng.lng();
    if (marker) { marker.setPosition(e.latLng); }
    else { marker = new google.maps.Marker({ position: e.latLng, map: map }); }
  });
}
"#;

fn maps_loader(maps_key: &str, libraries: &str) -> Markup {
    let src = format!(
        "https://maps.googleapis.com/maps/api/js?key={}&libraries={}&callback=initMap",
        urlencoding::encode(maps_key),
        urlencoding::encode(libraries),
    );
    html! { script src=(src) defer {} }
}

fn layout(title: &str, flash: Option<&Flash>, body: Markup, scripts: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { "#map { height: 480px; width: 100%; } .error { color: #b00020; }" }
            }
            body {
                nav {
                    a href="/" { "Map" } " | "
                    a href="/new-location" { "New location" } " | "
                    a href="/new-post" { "New post" }
                }
                @if let Some(flash) = flash {
                    div class=(format!("flash flash-{}", flash.category)) { (flash.message) }
                }
                main { (body) }
                (scripts)
            }
        }
    }
}

fn field_error(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            span class="error" { (message) }
        }
    }
}

pub fn map_page(maps_key: &str, flash: Option<&Flash>) -> Markup {
    let body = html! {
        h1 { "Locations" }
        div #map data-lat=(DEFAULT_CENTER.0) data-lng=(DEFAULT_CENTER.1) {}
    };
    let scripts = html! {
        script { (PreEscaped(MAP_SCRIPT)) }
        (maps_loader(maps_key, "geometry"))
    };
    layout("Map", flash, body, scripts)
}

pub fn detail_page(maps_key: &str, item: &LocationDict) -> Markup {
    let title = item.description.as_deref().unwrap_or("Location");
    let body = html! {
        h1 { (title) }
        p { "Latitude " (item.location.lat) ", longitude " (item.location.lng) }
        div #map data-lat=(item.location.lat) data-lng=(item.location.lng) {}
    };
    let scripts = html! {
        script { (PreEscaped(DETAIL_SCRIPT)) }
        (maps_loader(maps_key, "marker"))
    };
    layout(title, None, body, scripts)
}

pub fn new_location_page(
    maps_key: &str,
    form: &NewLocationForm,
    errors: &FieldErrors,
    csrf_token: &str,
) -> Markup {
    let body = html! {
        h1 { "New location" }
        p { "Click on the map to place the location." }
        div #map data-lat=(DEFAULT_CENTER.0) data-lng=(DEFAULT_CENTER.1) {}
        form method="post" action="/new-location" {
            input type="hidden" name="csrf_token" value=(csrf_token);
            (field_error(errors, "csrf_token"))
            input #coord_latitude type="hidden" name="coord_latitude" value=(form.coord_latitude);
            input #coord_longitude type="hidden" name="coord_longitude" value=(form.coord_longitude);
            (field_error(errors, "coord_latitude"))
            (field_error(errors, "coord_longitude"))
            p {
                label for="description" { "Description" }
                input #description type="text" name="description" maxlength="80" value=(form.description);
                (field_error(errors, "description"))
            }
            button type="submit" { "Create location" }
        }
    };
    let scripts = html! {
        script { (PreEscaped(PICKER_SCRIPT)) }
        (maps_loader(maps_key, "marker"))
    };
    layout("New location", None, body, scripts)
}

pub fn new_post_page(form: &NewPostForm, errors: &FieldErrors, csrf_token: &str) -> Markup {
    let body = html! {
        h1 { "New post" }
        form method="post" action="/new-post" {
            input type="hidden" name="csrf_token" value=(csrf_token);
            (field_error(errors, "csrf_token"))
            p {
                label for="title" { "Title" }
                input #title type="text" name="title" maxlength="100" value=(form.title);
                (field_error(errors, "title"))
            }
            p {
                label for="content" { "Content" }
                textarea #content name="content" rows="8" { (form.content) }
                (field_error(errors, "content"))
            }
            button type="submit" { "Post" }
        }
    };
    layout("New post", None, body, html! {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoposts_types::api::LatLng;

    #[test]
    fn detail_escapes_description() {
        let item = LocationDict {
            id: "abc".into(),
            description: Some("<b>Cafe</b>".into()),
            location: LatLng { lat: 52.0, lng: 13.0 },
        };
        let page = detail_page("key", &item).into_string();

        assert!(page.contains("&lt;b&gt;Cafe&lt;/b&gt;"));
        assert!(page.contains(r#"data-lat="52"#));
        assert!(page.contains("key=key"));
    }

    #[test]
    fn maps_key_is_percent_encoded() {
        let page = map_page("a&b#c d", None).into_string();
        assert!(page.contains("key=a%26b%23c%20d&amp;libraries=geometry"));
        assert!(!page.contains("key=a&amp;b#c"));
    }

    #[test]
    fn form_errors_are_rendered_next_to_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "This field is required.".into());
        let page = new_post_page(&NewPostForm::default(), &errors, "tok").into_string();

        assert!(page.contains("This field is required."));
        assert!(page.contains(r#"name="csrf_token" value="tok""#));
    }
}
