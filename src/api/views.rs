//! Page view models.
//!
//! Each page is an askama template extending `base.html`. Values reach the
//! templates pre-formatted, so templates only lay things out.

use askama::Template;
use uuid::Uuid;

use super::flash::FlashMessage;
use super::middleware::CurrentUser;
use crate::domain::reference::{DiseaseAlert, Scheme, SeasonWindow};
use crate::domain::{ForecastDay, ForumComment, ForumPost, OrderLine, Product, WeatherReport};

const DATE_FORMAT: &str = "%d %b %Y";
const DATETIME_FORMAT: &str = "%d %b %Y, %H:%M";
const EXCERPT_CHARS: usize = 150;

/// Navigation and flash data shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub username: Option<String>,
    pub flashes: Vec<FlashMessage>,
}

impl Layout {
    pub fn new(user: Option<&CurrentUser>, flashes: Vec<FlashMessage>) -> Self {
        Self {
            username: user.map(|u| u.username.clone()),
            flashes,
        }
    }
}

/// An entry of a `<select>` list.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value.eq_ignore_ascii_case(current),
        }
    }

    /// Options whose label is the capitalised value.
    pub fn list<'a>(values: impl IntoIterator<Item = &'a str>, current: &str) -> Vec<Self> {
        values
            .into_iter()
            .map(|value| Self::new(value, &capitalize(value), current))
            .collect()
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            price: product.price.to_string(),
            name: product.name,
            description: product.description,
            image: product.image,
            category: product.category,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartRow {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: i32,
    pub line_total: String,
}

impl From<OrderLine> for CartRow {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.order.id,
            price: line.product.price.to_string(),
            quantity: line.order.quantity,
            line_total: line.line_total().to_string(),
            name: line.product.name,
            image: line.product.image,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: Uuid,
    pub product: String,
    pub quantity: i32,
    pub price: String,
    pub total: String,
    pub date: String,
    pub status: String,
}

impl From<OrderLine> for OrderRow {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.order.id,
            quantity: line.order.quantity,
            price: line.product.price.to_string(),
            total: line.line_total().to_string(),
            date: line.order.order_date.format(DATETIME_FORMAT).to_string(),
            status: line.order.status.as_str().to_string(),
            product: line.product.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub date: String,
}

impl From<ForumPost> for PostRow {
    fn from(post: ForumPost) -> Self {
        Self {
            id: post.id,
            excerpt: excerpt(&post.content),
            date: post.date_posted.format(DATE_FORMAT).to_string(),
            title: post.title,
            category: post.category,
            author: post.author,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub date: String,
}

impl From<ForumPost> for PostDetail {
    fn from(post: ForumPost) -> Self {
        Self {
            id: post.id,
            date: post.date_posted.format(DATETIME_FORMAT).to_string(),
            title: post.title,
            content: post.content,
            category: post.category,
            author: post.author,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentRow {
    pub author: String,
    pub content: String,
    pub date: String,
}

impl From<ForumComment> for CommentRow {
    fn from(comment: ForumComment) -> Self {
        Self {
            date: comment.date_posted.format(DATETIME_FORMAT).to_string(),
            author: comment.author,
            content: comment.content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherCard {
    pub location: String,
    pub temperature: i32,
    pub condition: String,
    pub humidity: i32,
    pub wind_speed: i32,
    pub rainfall: String,
    pub icon: String,
    pub description: String,
    pub is_mock: bool,
}

impl From<WeatherReport> for WeatherCard {
    fn from(report: WeatherReport) -> Self {
        Self {
            temperature: report.temperature,
            humidity: report.humidity,
            wind_speed: report.wind_speed,
            rainfall: format!("{:.1}", report.rainfall),
            is_mock: report.is_mock,
            location: report.location,
            condition: report.condition,
            icon: report.icon,
            description: report.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRow {
    pub day: String,
    pub condition: String,
    pub high: i32,
    pub low: i32,
    pub icon: String,
}

impl From<ForecastDay> for ForecastRow {
    fn from(day: ForecastDay) -> Self {
        Self {
            day: day.day,
            condition: day.condition,
            high: day.high,
            low: day.low,
            icon: day.icon,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CropRow {
    pub name: String,
    pub seasons: String,
    pub states: String,
}

#[derive(Debug, Clone)]
pub struct PriceRow {
    pub crop: String,
    pub min: String,
    pub max: String,
    pub unit: String,
    pub known: bool,
}

// =============================================================================
// Pages
// =============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub layout: Layout,
    pub username: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub layout: Layout,
    pub next: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub layout: Layout,
    pub recent_orders: Vec<OrderRow>,
    pub weather: Option<WeatherCard>,
    pub recent_posts: Vec<PostRow>,
}

#[derive(Template)]
#[template(path = "weather.html")]
pub struct WeatherPage {
    pub layout: Layout,
    pub weather: WeatherCard,
    pub forecast: Vec<ForecastRow>,
    pub location: String,
    pub subscribed: bool,
}

#[derive(Template)]
#[template(path = "diseases.html")]
pub struct DiseasesPage {
    pub layout: Layout,
    pub alerts: Vec<DiseaseAlert>,
}

#[derive(Template)]
#[template(path = "crop_calendar.html")]
pub struct CropCalendarPage {
    pub layout: Layout,
    pub crop: String,
    pub windows: Vec<SeasonWindow>,
    pub crops: Vec<SelectOption>,
    pub catalog: Vec<CropRow>,
}

#[derive(Template)]
#[template(path = "market_prices.html")]
pub struct MarketPricesPage {
    pub layout: Layout,
    pub crops: Vec<SelectOption>,
    pub price: Option<PriceRow>,
}

#[derive(Template)]
#[template(path = "government_schemes.html")]
pub struct SchemesPage {
    pub layout: Layout,
    pub schemes: Vec<Scheme>,
}

#[derive(Template)]
#[template(path = "expert_advice.html")]
pub struct ExpertAdvicePage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "soil_testing.html")]
pub struct SoilTestingPage {
    pub layout: Layout,
    pub soil_type: Option<String>,
    pub recommendations: Vec<String>,
    pub checked_on: String,
}

#[derive(Template)]
#[template(path = "loan_calculator.html")]
pub struct LoanPage {
    pub layout: Layout,
    pub amount: String,
    pub rate: String,
    pub tenure: String,
    pub emi: String,
    pub total_interest: String,
    pub total_payable: String,
    pub calculated: bool,
}

#[derive(Template)]
#[template(path = "forum.html")]
pub struct ForumPage {
    pub layout: Layout,
    pub posts: Vec<PostRow>,
    pub categories: Vec<SelectOption>,
    pub category: String,
    pub page: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl ForumPage {
    pub fn prev_page(&self) -> u64 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> u64 {
        self.page + 1
    }
}

#[derive(Template)]
#[template(path = "forum_post.html")]
pub struct ForumPostPage {
    pub layout: Layout,
    pub post: PostDetail,
    pub comments: Vec<CommentRow>,
}

#[derive(Template)]
#[template(path = "create_forum_post.html")]
pub struct CreatePostPage {
    pub layout: Layout,
    pub categories: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "shop.html")]
pub struct ShopPage {
    pub layout: Layout,
    pub products: Vec<ProductCard>,
    pub categories: Vec<SelectOption>,
    pub is_all: bool,
}

#[derive(Template)]
#[template(path = "cart.html")]
pub struct CartPage {
    pub layout: Layout,
    pub items: Vec<CartRow>,
    pub total: String,
}

#[derive(Template)]
#[template(path = "orders.html")]
pub struct OrdersPage {
    pub layout: Layout,
    pub orders: Vec<OrderRow>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub layout: Layout,
    pub email: String,
    pub member_since: String,
    pub farm_location: String,
    pub farm_size: String,
    pub crops: String,
    pub phone: String,
    pub soil_types: Vec<SelectOption>,
    pub languages: Vec<SelectOption>,
    pub weather_alerts: bool,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub layout: Layout,
    pub code: u16,
    pub title: String,
    pub message: String,
}
