//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the screen-scoped state (diary editor, breathing session) that
//!   must survive between calls.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Responses are deterministic envelopes; user-facing messages stay in
//!   the product language, diagnostics stay in English.
//! - The database path is fixed for the lifetime of the process.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use chrono::NaiveDate;
use log::{error, warn};

use alento_core::breathing::session::{
    format_remaining, ENCOURAGEMENT_TEXT, FINISHED_SUBTITLE, FINISHED_TITLE,
};
use alento_core::db::open_db;
use alento_core::model::mood::DEFAULT_HIGHLIGHT_COLOR;
use alento_core::service::diary_editor::{
    DELETE_CONFIRM_ACTION, DELETE_CONFIRM_BODY, DELETE_CONFIRM_CANCEL, DELETE_CONFIRM_TITLE,
    FEEDBACK_DELETED,
};
use alento_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, Article, ArticleCatalog, BreathPhase, BreathingSession, DiaryEditor,
    DiaryEditorError, DurationChoice, FavoritesService, KvDiaryRepository, KvFavoritesRepository,
    KvProfileRepository, MoodCatalog, MoodId, ProfileService, SqliteBlobStore, StoreResult,
    UserProfile,
};

const DB_FILE_NAME: &str = "alento.sqlite3";
const EDITOR_NOT_OPEN_MESSAGE: &str = "diary editor not opened; call diary_open first";
const SAVE_ERROR_MESSAGE: &str = "Ocorreu um erro ao salvar sua anotação.";
const DELETE_ERROR_MESSAGE: &str = "Ocorreu um erro ao deletar sua anotação.";

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static DIARY_EDITOR: Mutex<Option<DiaryEditor>> = Mutex::new(None);
static BREATHING_SESSION: Mutex<Option<BreathingSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   an empty string selects the build-mode default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with a different level or directory return
///   an error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = if level.trim().is_empty() {
        default_log_level()
    } else {
        level.as_str()
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every store for this process.
///
/// The Flutter side passes its app documents directory at startup; when
/// this is never called the stores fall back to `ALENTO_DB_PATH` or a
/// temp-dir default.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - First call wins; a later call with another path returns an error
///   message instead of switching.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if active == &requested {
        String::new()
    } else {
        format!(
            "db path already initialized at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Mood option for the diary picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodOption {
    /// Stable mood identifier (`feliz|calmo|relaxado|raiva|triste`).
    pub id: String,
    /// Picker button label.
    pub label: String,
    /// Hex color for the calendar dot and screen accent.
    pub color: String,
    /// Asset path resolved by the Flutter side.
    pub image_asset: String,
}

/// Calendar decoration for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarkerDto {
    /// ISO `YYYY-MM-DD` date.
    pub date: String,
    pub has_dot: bool,
    pub dot_color: Option<String>,
    pub is_selected: bool,
    pub selected_color: Option<String>,
}

/// Full diary screen state after a diary call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryStateResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Feedback or error message; empty when there is nothing to show.
    pub message: String,
    pub selected_date: String,
    pub draft_mood: Option<String>,
    pub draft_text: String,
    pub entry_exists: bool,
    pub is_saved: bool,
    pub is_deleted: bool,
    pub was_editing: bool,
    pub is_input_focused: bool,
    pub delete_pending: bool,
    /// Inline validation message, when the last save was rejected.
    pub validation_error: Option<String>,
    /// Encouragement line for the draft mood.
    pub encouragement: Option<String>,
    /// Screen accent color following the draft mood.
    pub highlight_color: String,
    pub markers: Vec<DayMarkerDto>,
}

/// Duration option for the breathing setup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationOption {
    pub label: String,
    /// Total seconds; `None` for the unlimited option.
    pub seconds: Option<u64>,
}

/// Full breathing screen state after a breathing call.
#[derive(Debug, Clone, PartialEq)]
pub struct BreathingStateResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Diagnostic message; empty when there is nothing to report.
    pub message: String,
    /// Session state (`setup|running|paused|finished`).
    pub state: String,
    /// Breath phase (`inhale|exhale`).
    pub phase: String,
    /// Text inside the circle: pause label or phase instruction.
    pub circle_label: String,
    /// Label of the chosen duration, once one is selected.
    pub selected_label: Option<String>,
    /// Seconds left; `None` while no finite duration is in play.
    pub remaining_seconds: Option<u64>,
    /// `MM:SS` rendering of `remaining_seconds`.
    pub remaining_label: Option<String>,
    /// Circle scale between 1.0 and 1.3.
    pub scale: f64,
    pub show_encouragement: bool,
    pub encouragement_opacity: f64,
    pub can_start: bool,
}

/// Article projection with the viewer's favorite flag resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDto {
    pub id: String,
    pub title: String,
    pub image_asset: String,
    pub content: String,
    pub category: Option<String>,
    pub favorite: bool,
}

/// Favorite toggle outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggleResponse {
    pub ok: bool,
    /// Whether the article is a favorite after the toggle.
    pub favorite: bool,
    pub message: String,
}

/// Stored profile with the display fallback resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub name: String,
    pub avatar_uri: Option<String>,
    /// Name to render; falls back when the stored name is blank.
    pub display_name: String,
}

/// Generic command envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn success() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Static copy the screens render verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiCopy {
    pub delete_confirm_title: String,
    pub delete_confirm_body: String,
    pub delete_confirm_action: String,
    pub delete_confirm_cancel: String,
    pub encouragement_text: String,
    pub finished_title: String,
    pub finished_subtitle: String,
}

/// Returns the static copy used by the diary and breathing screens.
///
/// # FFI contract
/// - Sync call, non-blocking, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn ui_copy() -> UiCopy {
    UiCopy {
        delete_confirm_title: DELETE_CONFIRM_TITLE.to_string(),
        delete_confirm_body: DELETE_CONFIRM_BODY.to_string(),
        delete_confirm_action: DELETE_CONFIRM_ACTION.to_string(),
        delete_confirm_cancel: DELETE_CONFIRM_CANCEL.to_string(),
        encouragement_text: ENCOURAGEMENT_TEXT.to_string(),
        finished_title: FINISHED_TITLE.to_string(),
        finished_subtitle: FINISHED_SUBTITLE.to_string(),
    }
}

/// Lists the mood picker options in display order.
///
/// # FFI contract
/// - Sync call, non-blocking, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_moods() -> Vec<MoodOption> {
    let catalog = MoodCatalog::builtin();
    catalog
        .specs()
        .iter()
        .map(|spec| MoodOption {
            id: spec.id.as_str().to_string(),
            label: spec.label.to_string(),
            color: spec.color.to_string(),
            image_asset: spec.image_asset.to_string(),
        })
        .collect()
}

/// Loads the diary store and opens the editor on `selected_date`.
///
/// `initial_mood` carries a mood picked on another screen; it applies
/// only when the selected day has no stored mood.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - A corrupt or missing store opens as empty; only infrastructure
///   failures surface as `ok=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_open(selected_date: String, initial_mood: Option<String>) -> DiaryStateResponse {
    let date = match parse_date(&selected_date) {
        Ok(date) => date,
        Err(message) => return diary_failure(message),
    };
    let initial = match initial_mood {
        Some(raw) => match MoodId::parse(&raw) {
            Some(mood) => Some(mood),
            None => return diary_failure(format!("unknown mood `{raw}`")),
        },
        None => None,
    };
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=diary_open module=ffi status=error reason=db_open error={err}");
            return diary_failure(format!("diary DB open failed: {err}"));
        }
    };
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    let editor = DiaryEditor::open(&repo, MoodCatalog::builtin(), date, initial);

    let mut guard = lock_editor();
    let response = diary_state(&editor, true, "");
    *guard = Some(editor);
    response
}

/// Moves the open editor to another day.
///
/// # FFI contract
/// - Sync call, in-memory execution; drafts rebuild from the store copy.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_select_date(date: String) -> DiaryStateResponse {
    let parsed = match parse_date(&date) {
        Ok(parsed) => parsed,
        Err(message) => return diary_failure(message),
    };
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    editor.select_date(parsed);
    diary_state(editor, true, "")
}

/// Sets the draft mood; a chosen mood clears the inline validation.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_set_mood(mood: String) -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    let Some(parsed) = MoodId::parse(&mood) else {
        return diary_state(editor, false, format!("unknown mood `{mood}`"));
    };
    editor.set_mood(parsed);
    diary_state(editor, true, "")
}

/// Replaces the draft text.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_set_text(text: String) -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    editor.set_text(text);
    diary_state(editor, true, "")
}

/// Tracks whether the text input has focus.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_set_input_focused(focused: bool) -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    editor.set_input_focused(focused);
    diary_state(editor, true, "")
}

/// Validates the drafts and persists the whole store.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Validation failures return `ok=false` with the inline message set.
/// - Write failures return `ok=false` with user-facing copy; in-memory
///   state is left unchanged.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_save() -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=diary_save module=ffi status=error reason=db_open error={err}");
            return diary_state(editor, false, SAVE_ERROR_MESSAGE);
        }
    };
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    match editor.save(&repo) {
        Ok(kind) => diary_state(editor, true, kind.feedback()),
        Err(DiaryEditorError::Validation(err)) => diary_state(editor, false, err.to_string()),
        Err(err) => {
            error!("event=diary_save module=ffi status=error error={err}");
            diary_state(editor, false, SAVE_ERROR_MESSAGE)
        }
    }
}

/// First step of the delete flow; the screen shows the confirmation.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_request_delete() -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    editor.request_delete();
    diary_state(editor, true, "")
}

/// Dismisses the delete confirmation without touching the store.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_cancel_delete() -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    editor.cancel_delete();
    diary_state(editor, true, "")
}

/// Confirms the delete and persists the shrunken store.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Deleting a day without an entry is a successful no-op.
/// - Write failures return `ok=false` with user-facing copy; in-memory
///   state is left unchanged.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_confirm_delete() -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=diary_delete module=ffi status=error reason=db_open error={err}");
            return diary_state(editor, false, DELETE_ERROR_MESSAGE);
        }
    };
    let repo = KvDiaryRepository::new(SqliteBlobStore::new(&conn));
    match editor.confirm_delete(&repo) {
        Ok(true) => diary_state(editor, true, FEEDBACK_DELETED),
        Ok(false) => diary_state(editor, true, ""),
        Err(err) => {
            error!("event=diary_delete module=ffi status=error error={err}");
            diary_state(editor, false, DELETE_ERROR_MESSAGE)
        }
    }
}

/// Resets the timed feedback flags once the banner expires.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_clear_feedback() -> DiaryStateResponse {
    let mut guard = lock_editor();
    let Some(editor) = guard.as_mut() else {
        return diary_failure(EDITOR_NOT_OPEN_MESSAGE);
    };
    editor.clear_feedback();
    diary_state(editor, true, "")
}

/// Lists the breathing duration options in display order.
///
/// # FFI contract
/// - Sync call, non-blocking, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_options() -> Vec<DurationOption> {
    DurationChoice::all()
        .into_iter()
        .map(|choice| DurationOption {
            label: choice.label().to_string(),
            seconds: choice.seconds(),
        })
        .collect()
}

/// Returns the current breathing screen state without mutating it.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_state() -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    breathing_response(session, true, "")
}

/// Picks a session duration on the setup screen.
///
/// `seconds` must match one of the offered options; `None` selects the
/// unlimited session.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
/// - Unknown second counts return `ok=false` and leave the state as is.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_select_duration(seconds: Option<u64>) -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    match DurationChoice::from_seconds(seconds) {
        Some(choice) => {
            session.select_duration(choice);
            breathing_response(session, true, "")
        }
        None => breathing_response(
            session,
            false,
            format!("unsupported duration seconds={seconds:?}"),
        ),
    }
}

/// Starts the session with the selected duration.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
/// - Rejected (no duration selected, or not on setup) returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_start() -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    if session.start() {
        breathing_response(session, true, "")
    } else {
        breathing_response(
            session,
            false,
            "breathing_start rejected: select a duration on the setup screen first",
        )
    }
}

/// Feeds elapsed wall-clock milliseconds into the session.
///
/// The Flutter side calls this from its frame ticker; paused and setup
/// states ignore the elapsed time.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_advance(elapsed_ms: u64) -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    session.advance(Duration::from_millis(elapsed_ms));
    breathing_response(session, true, "")
}

/// Flips between running and paused.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_toggle_pause() -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    session.toggle_pause();
    breathing_response(session, true, "")
}

/// Abandons the session and returns to the setup screen.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
/// - Also clears the selected duration.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_cancel() -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    session.cancel();
    breathing_response(session, true, "")
}

/// Leaves the finished screen and returns to setup.
///
/// # FFI contract
/// - Sync call, in-memory execution, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn breathing_acknowledge() -> BreathingStateResponse {
    let mut guard = lock_breathing();
    let session = guard.get_or_insert_with(BreathingSession::new);
    session.acknowledge_finished();
    breathing_response(session, true, "")
}

/// Searches article titles; a blank query returns the whole catalog.
///
/// # FFI contract
/// - Sync call; reads the favorites store to resolve flags.
/// - Favorites read failures degrade to `favorite=false`, never errors.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn articles_search(query: String) -> Vec<ArticleDto> {
    let catalog = ArticleCatalog::builtin();
    let favorites = current_favorite_ids();
    catalog
        .search(&query)
        .into_iter()
        .map(|article| to_article_dto(article, is_favorited(&favorites, article)))
        .collect()
}

/// Lists the fixed category chips for the articles screen.
///
/// # FFI contract
/// - Sync call, non-blocking, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn article_categories() -> Vec<String> {
    let catalog = ArticleCatalog::builtin();
    catalog
        .categories()
        .iter()
        .map(|category| category.to_string())
        .collect()
}

/// Looks up one article by id for the detail screen.
///
/// # FFI contract
/// - Sync call; reads the favorites store to resolve the flag.
/// - Never panics; unknown ids return `None`.
#[flutter_rust_bridge::frb(sync)]
pub fn article_by_id(id: String) -> Option<ArticleDto> {
    let catalog = ArticleCatalog::builtin();
    let favorites = current_favorite_ids();
    catalog
        .by_id(&id)
        .map(|article| to_article_dto(article, is_favorited(&favorites, article)))
}

/// Adds or removes an article from the favorites store.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - The durable write happens before the new state is reported.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn favorites_toggle(article_id: String) -> FavoriteToggleResponse {
    match with_favorites(|service| service.toggle(&article_id)) {
        Ok(favorite) => FavoriteToggleResponse {
            ok: true,
            favorite,
            message: String::new(),
        },
        Err(message) => {
            error!("event=favorites_toggle module=ffi status=error error={message}");
            FavoriteToggleResponse {
                ok: false,
                favorite: false,
                message,
            }
        }
    }
}

/// Resolves the stored favorites against the catalog, in catalog order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Read failures degrade to an empty list, never errors.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn favorites_list() -> Vec<ArticleDto> {
    let catalog = ArticleCatalog::builtin();
    match with_favorites(|service| Ok(service.favorite_articles(&catalog))) {
        Ok(articles) => articles
            .into_iter()
            .map(|article| to_article_dto(article, true))
            .collect(),
        Err(message) => {
            warn!("event=favorites_list module=ffi status=recovered error={message}");
            Vec::new()
        }
    }
}

/// Reads the stored profile, falling back to the default when absent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Read failures degrade to the default profile, never errors.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_get() -> ProfileResponse {
    match with_profile(|service| Ok(service.get())) {
        Ok(profile) => to_profile_response(profile),
        Err(message) => {
            warn!("event=profile_get module=ffi status=recovered error={message}");
            to_profile_response(UserProfile::default())
        }
    }
}

/// Durably writes the profile.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return `ok=false` with a diagnostic message.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_save(name: String, avatar_uri: Option<String>) -> ActionResponse {
    let profile = UserProfile { name, avatar_uri };
    match with_profile(|service| service.save(&profile)) {
        Ok(()) => ActionResponse::success(),
        Err(message) => {
            error!("event=profile_save module=ffi status=error error={message}");
            ActionResponse::failure(format!("profile_save failed: {message}"))
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ALENTO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn lock_editor() -> MutexGuard<'static, Option<DiaryEditor>> {
    DIARY_EDITOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock_breathing() -> MutexGuard<'static, Option<BreathingSession>> {
    BREATHING_SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{raw}`; expected YYYY-MM-DD: {err}"))
}

fn diary_state(editor: &DiaryEditor, ok: bool, message: impl Into<String>) -> DiaryStateResponse {
    let markers = editor
        .markers()
        .into_iter()
        .map(|(date, marker)| DayMarkerDto {
            date: date.to_string(),
            has_dot: marker.has_dot,
            dot_color: marker.dot_color.map(str::to_string),
            is_selected: marker.is_selected,
            selected_color: marker.selected_color.map(str::to_string),
        })
        .collect();
    DiaryStateResponse {
        ok,
        message: message.into(),
        selected_date: editor.selected_date().to_string(),
        draft_mood: editor.draft_mood().map(|mood| mood.as_str().to_string()),
        draft_text: editor.draft_text().to_string(),
        entry_exists: editor.entry_exists(),
        is_saved: editor.is_saved(),
        is_deleted: editor.is_deleted(),
        was_editing: editor.was_editing(),
        is_input_focused: editor.is_input_focused(),
        delete_pending: editor.delete_pending(),
        validation_error: editor.validation_error().map(|err| err.to_string()),
        encouragement: editor.encouragement().map(str::to_string),
        highlight_color: editor.highlight_color().to_string(),
        markers,
    }
}

fn diary_failure(message: impl Into<String>) -> DiaryStateResponse {
    DiaryStateResponse {
        ok: false,
        message: message.into(),
        selected_date: String::new(),
        draft_mood: None,
        draft_text: String::new(),
        entry_exists: false,
        is_saved: false,
        is_deleted: false,
        was_editing: false,
        is_input_focused: false,
        delete_pending: false,
        validation_error: None,
        encouragement: None,
        highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
        markers: Vec::new(),
    }
}

fn breathing_response(
    session: &BreathingSession,
    ok: bool,
    message: impl Into<String>,
) -> BreathingStateResponse {
    BreathingStateResponse {
        ok,
        message: message.into(),
        state: session.state().name().to_string(),
        phase: phase_label(session.phase()).to_string(),
        circle_label: session.circle_label().to_string(),
        selected_label: session.duration().map(|choice| choice.label().to_string()),
        remaining_seconds: session.remaining_seconds(),
        remaining_label: session.remaining_seconds().map(format_remaining),
        scale: session.scale(),
        show_encouragement: session.show_encouragement(),
        encouragement_opacity: session.encouragement_opacity(),
        can_start: session.can_start(),
    }
}

fn phase_label(phase: BreathPhase) -> &'static str {
    match phase {
        BreathPhase::Inhale => "inhale",
        BreathPhase::Exhale => "exhale",
    }
}

fn to_article_dto(article: &Article, favorite: bool) -> ArticleDto {
    ArticleDto {
        id: article.id.to_string(),
        title: article.title.to_string(),
        image_asset: article.image_asset.to_string(),
        content: article.content.to_string(),
        category: article.category.map(str::to_string),
        favorite,
    }
}

fn is_favorited(favorite_ids: &[String], article: &Article) -> bool {
    favorite_ids.iter().any(|id| id == article.id)
}

fn to_profile_response(profile: UserProfile) -> ProfileResponse {
    let display_name = profile.display_name().to_string();
    ProfileResponse {
        name: profile.name,
        avatar_uri: profile.avatar_uri,
        display_name,
    }
}

fn current_favorite_ids() -> Vec<String> {
    match with_favorites(|service| Ok(service.favorite_ids())) {
        Ok(ids) => ids,
        Err(message) => {
            warn!("event=favorites_read module=ffi status=recovered error={message}");
            Vec::new()
        }
    }
}

fn with_favorites<T>(
    f: impl FnOnce(&FavoritesService<KvFavoritesRepository<SqliteBlobStore<'_>>>) -> StoreResult<T>,
) -> Result<T, String> {
    let conn =
        open_db(resolve_db_path()).map_err(|err| format!("favorites DB open failed: {err}"))?;
    let service = FavoritesService::new(KvFavoritesRepository::new(SqliteBlobStore::new(&conn)));
    f(&service).map_err(|err| err.to_string())
}

fn with_profile<T>(
    f: impl FnOnce(&ProfileService<KvProfileRepository<SqliteBlobStore<'_>>>) -> StoreResult<T>,
) -> Result<T, String> {
    let conn =
        open_db(resolve_db_path()).map_err(|err| format!("profile DB open failed: {err}"))?;
    let service = ProfileService::new(KvProfileRepository::new(SqliteBlobStore::new(&conn)));
    f(&service).map_err(|err| err.to_string())
}
