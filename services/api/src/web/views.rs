//! services/api/src/web/views.rs
//!
//! Minimal server-rendered HTML: forms, informational pages, and result
//! views.

use axum::response::Html;
use krishi_core::domain::ForecastPoint;

use crate::web::routes::Realm;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    ))
}

fn error_line(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"error\">{}</p>", escape(message)),
        None => String::new(),
    }
}

//=========================================================================================
// Informational Pages
//=========================================================================================

pub fn landing() -> Html<String> {
    page(
        "Krishi Forecast",
        "<p>Prediction services for Maharashtra farming.</p>\n\
         <ul>\n\
         <li><a href=\"/rain_home\">Regional rainfall forecasting</a></li>\n\
         <li><a href=\"/crop_home\">Crop recommendation</a></li>\n\
         </ul>",
    )
}

pub fn rain_home() -> Html<String> {
    page(
        "Rainfall Forecasting",
        "<p>Monthly rainfall forecasts for the four regions of Maharashtra.</p>\n\
         <p><a href=\"/login_rain\">Login</a> or <a href=\"/register_rain\">Register</a></p>\n\
         <p><a href=\"/home\">Choose a region</a></p>",
    )
}

pub fn home() -> Html<String> {
    page(
        "Regions",
        "<ul>\n\
         <li><a href=\"/konkan\">Konkan</a></li>\n\
         <li><a href=\"/vidarbha\">Vidarbha</a></li>\n\
         <li><a href=\"/marathwada\">Marathwada</a></li>\n\
         <li><a href=\"/madhya_maharashtra\">Madhya Maharashtra</a></li>\n\
         </ul>\n\
         <p><a href=\"/logout_rain\">Logout</a></p>",
    )
}

pub fn region(title: &str, action: &str) -> Html<String> {
    let body = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Months to forecast: <input type=\"number\" name=\"months\" min=\"1\"></label>\n\
         <button type=\"submit\">Forecast</button>\n\
         </form>"
    );
    page(title, &body)
}

pub fn crop_home() -> Html<String> {
    page(
        "Crop Recommendation",
        "<p>Recommends a crop from soil and climate measurements.</p>\n\
         <p><a href=\"/login_crop\">Login</a> or <a href=\"/register_crop\">Register</a></p>",
    )
}

pub fn crop_index() -> Html<String> {
    let fields = [
        ("N", "Nitrogen (N)"),
        ("P", "Phosphorus (P)"),
        ("K", "Potassium (K)"),
        ("temperature", "Temperature (°C)"),
        ("humidity", "Humidity (%)"),
        ("ph", "Soil pH"),
        ("rainfall", "Rainfall (mm)"),
    ];
    let inputs: String = fields
        .iter()
        .map(|(name, label)| {
            format!(
                "<label>{label}: <input type=\"text\" name=\"{name}\"></label><br>\n"
            )
        })
        .collect();
    let body = format!(
        "<form method=\"post\" action=\"/crop_parameters\">\n{inputs}\
         <button type=\"submit\">Recommend a crop</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/logout_crop\"><button type=\"submit\">Logout</button></form>"
    );
    page("Crop Parameters", &body)
}

//=========================================================================================
// Auth Pages
//=========================================================================================

pub fn login(realm: Realm, error: Option<&str>) -> Html<String> {
    let (title, action, register) = match realm {
        Realm::Rain => ("Rainfall Login", "/login_rain", "/register_rain"),
        Realm::Crop => ("Crop Login", "/login_crop", "/register_crop"),
    };
    let body = format!(
        "{}<form method=\"post\" action=\"{action}\">\n\
         <label>Email: <input type=\"email\" name=\"email\"></label><br>\n\
         <label>Password: <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p>No account? <a href=\"{register}\">Register</a></p>",
        error_line(error)
    );
    page(title, &body)
}

pub fn register(realm: Realm, error: Option<&str>) -> Html<String> {
    let (title, action, login) = match realm {
        Realm::Rain => ("Rainfall Registration", "/register_rain", "/login_rain"),
        Realm::Crop => ("Crop Registration", "/register_crop", "/login_crop"),
    };
    let body = format!(
        "{}<form method=\"post\" action=\"{action}\">\n\
         <label>Email: <input type=\"email\" name=\"email\"></label><br>\n\
         <label>Password: <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"{login}\">Login</a></p>",
        error_line(error)
    );
    page(title, &body)
}

//=========================================================================================
// Result Pages
//=========================================================================================

pub fn forecast_result(points: &[ForecastPoint]) -> Html<String> {
    let rows: String = points
        .iter()
        .map(|point| {
            format!(
                "<tr><td>{}</td><td>{:.2}</td></tr>\n",
                escape(&point.label),
                point.rainfall_mm
            )
        })
        .collect();
    let body = format!(
        "<table>\n<tr><th>Date</th><th>Rainfall (mm)</th></tr>\n{rows}</table>\n\
         <p><a href=\"/home\">Back to regions</a></p>"
    );
    page("Rainfall Forecast", &body)
}

pub fn forecast_error(message: &str) -> Html<String> {
    let body = format!(
        "{}<p><a href=\"/home\">Back to regions</a></p>",
        error_line(Some(message))
    );
    page("Rainfall Forecast", &body)
}

pub fn crop_result(crop: &str) -> Html<String> {
    let body = format!(
        "<p>Recommended crop: <strong>{}</strong></p>\n\
         <p><a href=\"/crop_index\">Try other parameters</a></p>",
        escape(crop)
    );
    page("Crop Recommendation", &body)
}

pub fn crop_error(message: &str) -> Html<String> {
    let body = format!(
        "{}<p><a href=\"/crop_index\">Try other parameters</a></p>",
        error_line(Some(message))
    );
    page("Crop Recommendation", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_values_render_to_two_decimal_places() {
        let points = vec![
            ForecastPoint {
                label: "January 2027".to_string(),
                rainfall_mm: 12.5,
            },
            ForecastPoint {
                label: "February 2027".to_string(),
                rainfall_mm: 8.256,
            },
        ];
        let Html(body) = forecast_result(&points);
        assert!(body.contains("January 2027"));
        assert!(body.contains("12.50"));
        assert!(body.contains("8.26"));
    }

    #[test]
    fn dynamic_text_is_escaped() {
        let Html(body) = crop_result("<script>alert(1)</script>");
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }
}
