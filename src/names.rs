pub const QUIZ_URL: &str = "/quiz";
pub const RECORD_ANSWER_URL: &str = "/quiz/answer";
pub const RESET_QUIZ_URL: &str = "/quiz/reset";
pub const SUBMIT_QUIZ_URL: &str = "/quiz/submit";

pub const MATCHES_URL: &str = "/matches";
pub const SELECT_MATCH_URL: &str = "/matches/select";
pub const SAVE_WEIGHTS_URL: &str = "/matches/weights";
pub const EXPORT_REPORT_URL: &str = "/matches/export";

pub const CHANCE_URL: &str = "/chance";

pub const SESSION_COOKIE_NAME: &str = "match_session";

// Collaborator endpoints, relative to the configured API base URL.
pub const MATCH_API_PATH: &str = "/api/match";
pub const FULL_MATCHES_API_PATH: &str = "/api/full-matches";
pub const REPORT_API_PATH: &str = "/api/download-pdf";
pub const CHANCE_API_PATH: &str = "/api/chance-me";
pub const PROGRAM_MENTORS_API_PATH: &str = "/api/program-mentors";
