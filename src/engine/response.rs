//! Response descriptors handed to the renderer
//!
//! A small tagged union, not a rendering. The transport layer turns these
//! into provider-specific rich messages.

use crate::places::{Coordinate, Place};

/// One response per inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Plain text prompt.
    Text(String),
    /// A batch of places; `more_available` drives the "show more" affordance.
    Places {
        places: Vec<Place>,
        more_available: bool,
    },
    /// Every candidate from the current search has been shown.
    Exhausted,
    /// Destination hand-off for the navigate action.
    Navigation {
        name: String,
        address: String,
        coordinate: Coordinate,
    },
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Response::Text(text.into())
    }
}

/// User-facing prompt strings.
pub mod prompts {
    pub const WELCOME: &str =
        "👋 歡迎使用 EatIt 美食推薦機器人！想找餐廳嗎？點下面的按鈕來開始推薦 🍜";
    pub const SEND_LOCATION_HINT: &str =
        "請傳送您的位置，或輸入「開始找餐廳」來進行條件搜尋！";
    pub const UNSUPPORTED: &str =
        "請傳送您的位置，或輸入「開始找餐廳」來獲取附近美食推薦！";
    pub const ASK_CUISINE: &str =
        "你想吃什麼料理呢？（中式、日式、西式、台式、韓式，不限）";
    pub const ASK_RATING: &str = "想找幾星以上的餐廳呢？（請輸入 1～5，預設 3）";
    pub const ASK_RADIUS: &str =
        "想搜尋多遠範圍的餐廳？（請輸入數字，單位公尺，預設 2000）";
    pub const ASK_LOCATION: &str =
        "想在哪裡找餐廳呢？輸入地點名稱，或直接傳送您的位置 📍";
    pub const GEOCODE_RETRY: &str =
        "找不到這個地點 😢 請換個說法再試一次，或直接傳送您的位置！";
    pub const GEOCODE_GIVE_UP: &str =
        "一直找不到這個地點 😢 請稍後再試，或直接傳送您的位置給我！";
    pub const NO_SEED: &str = "請先傳送您的位置給我，我會為您推薦附近的美食！";
    pub const EMPTY_RESULT: &str = "找不到符合條件的餐廳 😢 請再換個條件或位置試試看！";
    pub const UPSTREAM_FAILURE: &str = "抱歉，發生了一些錯誤，請稍後再試。";
}
