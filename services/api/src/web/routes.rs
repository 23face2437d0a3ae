//! services/api/src/web/routes.rs
//!
//! The explicit route table the auth gate consults: every route identifier,
//! the realm it belongs to, and whether it needs a login session.
//!
//! Only the five prediction submission endpoints require a session. Every
//! informational, login, registration, and logout page is reachable
//! unauthenticated; that asymmetry is the application's security boundary.

/// A named authentication domain with its own login entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realm {
    Rain,
    Crop,
}

impl Realm {
    /// Where an unauthenticated request to a protected route is sent.
    pub fn login_path(self) -> &'static str {
        match self {
            Realm::Rain => "/login_rain",
            Realm::Crop => "/login_crop",
        }
    }

    /// Where a successful login lands.
    pub fn post_login_path(self) -> &'static str {
        match self {
            Realm::Rain => "/home",
            Realm::Crop => "/crop_index",
        }
    }
}

/// One identifier per HTTP route the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteId {
    Landing,
    RegisterRain,
    RegisterCrop,
    LoginRain,
    LoginCrop,
    LogoutRain,
    LogoutCrop,
    RainHome,
    Home,
    Konkan,
    KonkanPrediction,
    Vidarbha,
    VidarbhaPrediction,
    Marathwada,
    MarathwadaPrediction,
    MadhyaMaharashtra,
    MadhyaMaharashtraPrediction,
    CropHome,
    CropIndex,
    CropParameters,
}

impl RouteId {
    /// Resolves a request path to its route identifier. Unknown paths return
    /// `None` and fall through to the router's 404 handling.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(RouteId::Landing),
            "/register_rain" => Some(RouteId::RegisterRain),
            "/register_crop" => Some(RouteId::RegisterCrop),
            "/login_rain" => Some(RouteId::LoginRain),
            "/login_crop" => Some(RouteId::LoginCrop),
            "/logout_rain" => Some(RouteId::LogoutRain),
            "/logout_crop" => Some(RouteId::LogoutCrop),
            "/rain_home" => Some(RouteId::RainHome),
            "/home" => Some(RouteId::Home),
            "/konkan" => Some(RouteId::Konkan),
            "/konkan_prediction" => Some(RouteId::KonkanPrediction),
            "/vidarbha" => Some(RouteId::Vidarbha),
            "/vidarbha_prediction" => Some(RouteId::VidarbhaPrediction),
            "/marathwada" => Some(RouteId::Marathwada),
            "/marathwada_prediction" => Some(RouteId::MarathwadaPrediction),
            "/madhya_maharashtra" => Some(RouteId::MadhyaMaharashtra),
            "/madhya_maharashtra_prediction" => Some(RouteId::MadhyaMaharashtraPrediction),
            "/crop_home" => Some(RouteId::CropHome),
            "/crop_index" => Some(RouteId::CropIndex),
            "/crop_parameters" => Some(RouteId::CropParameters),
            _ => None,
        }
    }

    /// The realm a route belongs to; decides which login page an
    /// unauthenticated request is redirected to.
    pub fn realm(self) -> Realm {
        match self {
            RouteId::LoginCrop
            | RouteId::CropHome
            | RouteId::CropIndex
            | RouteId::CropParameters => Realm::Crop,
            _ => Realm::Rain,
        }
    }

    /// Whether the gate demands a login session before dispatch.
    pub fn requires_session(self) -> bool {
        matches!(
            self,
            RouteId::KonkanPrediction
                | RouteId::VidarbhaPrediction
                | RouteId::MarathwadaPrediction
                | RouteId::MadhyaMaharashtraPrediction
                | RouteId::CropParameters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_the_submission_routes_require_a_session() {
        let protected = [
            "/konkan_prediction",
            "/vidarbha_prediction",
            "/marathwada_prediction",
            "/madhya_maharashtra_prediction",
            "/crop_parameters",
        ];
        for path in protected {
            let route = RouteId::from_path(path).expect("known route");
            assert!(route.requires_session(), "{path} must require a session");
        }

        let public = [
            "/",
            "/register_rain",
            "/register_crop",
            "/login_rain",
            "/login_crop",
            "/logout_rain",
            "/logout_crop",
            "/rain_home",
            "/home",
            "/konkan",
            "/vidarbha",
            "/marathwada",
            "/madhya_maharashtra",
            "/crop_home",
            "/crop_index",
        ];
        for path in public {
            let route = RouteId::from_path(path).expect("known route");
            assert!(!route.requires_session(), "{path} must stay public");
        }
    }

    #[test]
    fn crop_routes_resolve_to_the_crop_realm() {
        for path in ["/login_crop", "/crop_home", "/crop_index", "/crop_parameters"] {
            let route = RouteId::from_path(path).expect("known route");
            assert_eq!(route.realm(), Realm::Crop, "{path}");
        }
        // Everything else, including crop logout and registration, keeps the
        // rain realm as its default.
        for path in ["/", "/register_crop", "/logout_crop", "/konkan_prediction"] {
            let route = RouteId::from_path(path).expect("known route");
            assert_eq!(route.realm(), Realm::Rain, "{path}");
        }
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert_eq!(RouteId::from_path("/admin"), None);
        assert_eq!(RouteId::from_path("/konkan/"), None);
    }

    #[test]
    fn protected_routes_redirect_into_their_own_realm() {
        let crop = RouteId::from_path("/crop_parameters").expect("known route");
        assert_eq!(crop.realm().login_path(), "/login_crop");

        let rain = RouteId::from_path("/vidarbha_prediction").expect("known route");
        assert_eq!(rain.realm().login_path(), "/login_rain");
    }
}
