use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use std::time::Instant;

use astra::Request;
use tracing::debug;

use crate::app::App;
use crate::domain::PlaceCategory;
use crate::errors::ServerError;
use crate::map::{self, CommandBuffer};
use crate::responses::{asset_response, html_response, json_response, with_header, ResultResp};
use crate::session::{session_cookie, session_token};
use crate::state::gallery::{ScrollDirection, Step, StripMetrics};
use crate::state::{Action, PanelRef, PanelTab};
use crate::templates;

const MAP_JS: &str = include_str!("../static/map.js");
const MAP_CSS: &str = include_str!("../static/map.css");

/// Larger form bodies are rejected; every form here is a handful of fields.
const MAX_FORM_BYTES: u64 = 16 * 1024;

/// Requests that read or change a session's state.
enum Route {
    Page,
    Scene,
    Warning,
    Action(Action),
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    // Assets and unknown paths never touch the session store.
    let route = match (method.as_str(), segments.as_slice()) {
        ("GET", ["static", "map.js"]) => return asset_response("application/javascript", MAP_JS),
        ("GET", ["static", "map.css"]) => return asset_response("text/css", MAP_CSS),
        ("GET", ["static", "htmx.js"]) => {
            let source = app.htmx().ok_or(ServerError::NotFound)?;
            return asset_response("application/javascript", source.to_string());
        }
        ("GET", []) => Route::Page,
        ("GET", ["map", "scene"]) => Route::Scene,
        ("GET", ["warning"]) => Route::Warning,
        ("POST", _) => {
            let form = Form::read(&mut req)?;
            Route::Action(post_action(&segments, &form)?)
        }
        _ => return Err(ServerError::NotFound),
    };

    let presented = session_token(&req);
    let (session, fresh) = app
        .sessions()
        .resolve(presented.as_deref(), Instant::now())?;

    let resp = respond(route, app, &session)?;

    if fresh {
        with_header(resp, "Set-Cookie", &session_cookie(&session))
    } else {
        Ok(resp)
    }
}

fn respond(route: Route, app: &App, session: &str) -> ResultResp {
    match route {
        Route::Page => {
            let page = app.read(session, |state| {
                templates::browser_page(state, app.config(), Instant::now())
            })?;
            html_response(page)
        }
        Route::Scene => {
            let scene = app.read(session, |state| map::scene(state, app.config()))?;
            json_response(&scene)
        }
        Route::Warning => {
            let warning = app.read(session, |state| {
                templates::components::capacity_warning(state.warning_remaining(Instant::now()))
            })?;
            html_response(warning)
        }
        Route::Action(action) => dispatch(app, session, action),
    }
}

/// Run the action and answer with the re-rendered overlay.
fn dispatch(app: &App, session: &str, action: Action) -> ResultResp {
    let mut commands = CommandBuffer::default();
    app.dispatch(session, action, &mut commands)?;

    let overlay = app.read(session, |state| {
        templates::overlay(state, Instant::now(), &commands)
    })?;
    html_response(overlay)
}

fn post_action(segments: &[&str], form: &Form) -> Result<Action, ServerError> {
    let action = match segments {
        ["listings", "toggle"] => Action::ToggleListings,
        ["listings", "info"] => Action::OpenInfoBox {
            key: form.required("key")?.to_string(),
        },
        ["listings", "open"] => Action::PromoteToPanel {
            key: form.required("key")?.to_string(),
        },
        ["info-box", "step"] => Action::StepInfoBoxImage(form.step()?),
        ["dismiss"] => Action::Dismiss,
        ["panels", "live", "pin"] => Action::PinCurrent,
        ["panels", "live", "visibility"] => Action::ToggleLiveVisibility,
        ["panels", raw, rest @ ..] => panel_action(parse_panel(raw)?, rest, form)?,
        _ => return Err(ServerError::NotFound),
    };

    debug!(?segments, "routed post");
    Ok(action)
}

fn panel_action(panel: PanelRef, rest: &[&str], form: &Form) -> Result<Action, ServerError> {
    let action = match (panel, rest) {
        (PanelRef::Live, ["close"]) => Action::CloseLive,
        (PanelRef::Pinned(id), ["close"]) => Action::ClosePinned(id),
        (PanelRef::Pinned(id), ["unpin"]) => Action::Unpin(id),
        (PanelRef::Live, ["unpin"]) => {
            return Err(ServerError::BadRequest("The live panel is not pinned".into()))
        }
        (_, ["expand"]) => Action::ToggleExpand(panel),
        (_, ["image"]) => Action::SetImageIndex {
            panel,
            index: form.parse("index")?,
        },
        (_, ["image", "step"]) => Action::StepImage {
            panel,
            step: form.step()?,
        },
        (_, ["thumbnails", "scroll"]) => {
            let strip = StripMetrics {
                scroll_left: form.parse("scroll_left")?,
                client_width: form.parse("client_width")?,
            };
            match form.get("direction") {
                Some(raw) => Action::ThumbnailArrow {
                    panel,
                    direction: ScrollDirection::parse(raw)
                        .ok_or_else(|| bad_value("direction", raw))?,
                    strip,
                },
                None => Action::ThumbnailsScrolled { panel, strip },
            }
        }
        (_, ["tab"]) => {
            let raw = form.required("tab")?;
            Action::SelectTab {
                panel,
                tab: PanelTab::parse(raw).ok_or_else(|| bad_value("tab", raw))?,
            }
        }
        (_, ["nearby"]) => {
            let raw = form.required("category")?;
            Action::SelectPlaceCategory {
                panel,
                category: PlaceCategory::parse(raw).ok_or_else(|| bad_value("category", raw))?,
            }
        }
        (_, ["nearby", "more"]) => Action::LoadMorePlaces(panel),
        (_, ["nearby", index, "view"]) => Action::ViewPlaceOnMap {
            panel,
            index: index.parse().map_err(|_| bad_value("place index", index))?,
        },
        _ => return Err(ServerError::NotFound),
    };
    Ok(action)
}

fn parse_panel(raw: &str) -> Result<PanelRef, ServerError> {
    PanelRef::parse(raw).ok_or(ServerError::NotFound)
}

fn bad_value(field: &str, raw: &str) -> ServerError {
    ServerError::BadRequest(format!("Invalid {field}: {raw:?}"))
}

/// `application/x-www-form-urlencoded` request body.
struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    fn read(req: &mut Request) -> Result<Self, ServerError> {
        let mut raw = Vec::new();
        req.body_mut()
            .reader()
            .take(MAX_FORM_BYTES + 1)
            .read_to_end(&mut raw)
            .map_err(|e| ServerError::BadRequest(format!("Unreadable body: {e}")))?;
        if raw.len() as u64 > MAX_FORM_BYTES {
            return Err(ServerError::BadRequest("Form body too large".into()));
        }

        let fields = url::form_urlencoded::parse(&raw).into_owned().collect();
        Ok(Self { fields })
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn required(&self, name: &str) -> Result<&str, ServerError> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ServerError::BadRequest(format!("Missing field: {name}")))
    }

    fn parse<T: FromStr>(&self, name: &str) -> Result<T, ServerError> {
        let raw = self.required(name)?;
        raw.parse().map_err(|_| bad_value(name, raw))
    }

    fn step(&self) -> Result<Step, ServerError> {
        let raw = self.required("step")?;
        Step::parse(raw).ok_or_else(|| bad_value("step", raw))
    }
}
