//! Home, dashboard and the agronomy reference pages.

use axum::{
    extract::{Query, State},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use super::{render, Page};
use crate::api::flash::{self, FlashLevel, FlashMessage};
use crate::api::middleware::CurrentUser;
use crate::api::views::{
    CropCalendarPage, CropRow, DashboardPage, DiseasesPage, ExpertAdvicePage, IndexPage, Layout,
    LoanPage, MarketPricesPage, PriceRow, SchemesPage, SelectOption, SoilTestingPage,
};
use crate::api::AppState;
use crate::domain::loan::LoanTerms;
use crate::domain::reference::{
    crop_calendar, disease_alerts_for, market_price, soil_recommendations, CROPS,
    GOVERNMENT_SCHEMES, PRICED_CROPS, SOIL_TESTING_TIPS,
};
use crate::domain::LoanQuote;
use crate::errors::AppResult;

/// Region used for the calendar when the profile has no farm location
const DEFAULT_REGION: &str = "India";

#[derive(Debug, Deserialize)]
pub struct CropQuery {
    #[serde(default)]
    pub crop: String,
}

/// Loan calculator form. Fields are parsed by hand so that bad input
/// re-shows the calculator instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LoanForm {
    #[serde(default)]
    pub loan_amount: String,
    #[serde(default)]
    pub interest_rate: String,
    #[serde(default)]
    pub loan_tenure: String,
}

impl LoanForm {
    fn terms(&self) -> Option<LoanTerms> {
        Some(LoanTerms {
            principal: self.loan_amount.trim().parse().ok()?,
            annual_rate: self.interest_rate.trim().parse().ok()?,
            tenure_years: self.loan_tenure.trim().parse().ok()?,
        })
    }
}

/// Pages open to anonymous visitors
pub fn public_page_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Pages that need a logged-in user
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/diseases", get(diseases))
        .route("/crop_calendar", get(crop_calendar_page))
        .route("/market_prices", get(market_prices))
        .route("/government_schemes", get(government_schemes))
        .route("/expert_advice", get(expert_advice))
        .route("/soil-testing", get(soil_testing))
        .route("/loan_calculator", get(loan_page).post(calculate_loan))
}

pub async fn index(user: Option<CurrentUser>, jar: CookieJar) -> AppResult<Page> {
    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        IndexPage {
            layout: Layout::new(user.as_ref(), flashes),
        },
    )
}

pub async fn dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Page> {
    let user = state.user_service.get_user(current.id).await?;

    let weather = async {
        match user.location() {
            Some(location) => Some(state.weather_service.current(location).await),
            None => None,
        }
    };
    let (orders, posts, weather) = tokio::join!(
        state.shop_service.recent_orders(current.id),
        state.forum_service.recent_posts(),
        weather,
    );

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        DashboardPage {
            layout: Layout::new(Some(&current), flashes),
            recent_orders: orders?.into_iter().map(Into::into).collect(),
            weather: weather.map(Into::into),
            recent_posts: posts?.into_iter().map(Into::into).collect(),
        },
    )
}

pub async fn diseases(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Page> {
    let user = state.user_service.get_user(current.id).await?;

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        DiseasesPage {
            layout: Layout::new(Some(&current), flashes),
            alerts: disease_alerts_for(&user.crop_list()),
        },
    )
}

pub async fn crop_calendar_page(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
    Query(query): Query<CropQuery>,
) -> AppResult<Page> {
    let crop = query.crop.trim().to_string();

    let windows = if crop.is_empty() {
        Vec::new()
    } else {
        let user = state.user_service.get_user(current.id).await?;
        crop_calendar(&crop, user.location().unwrap_or(DEFAULT_REGION))
    };

    let catalog = CROPS
        .iter()
        .map(|info| CropRow {
            name: info.name.to_string(),
            seasons: info.seasons.join(", "),
            states: info.states.join(", "),
        })
        .collect();

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        CropCalendarPage {
            layout: Layout::new(Some(&current), flashes),
            crops: SelectOption::list(CROPS.iter().map(|info| info.name), &crop),
            crop,
            windows,
            catalog,
        },
    )
}

pub async fn market_prices(
    current: CurrentUser,
    jar: CookieJar,
    Query(query): Query<CropQuery>,
) -> AppResult<Page> {
    let crop = query.crop.trim();

    let price = (!crop.is_empty()).then(|| {
        let band = market_price(crop);
        PriceRow {
            crop: crop.to_string(),
            min: band.min.to_string(),
            max: band.max.to_string(),
            unit: band.unit.to_string(),
            known: band.max > 0,
        }
    });

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        MarketPricesPage {
            layout: Layout::new(Some(&current), flashes),
            crops: SelectOption::list(PRICED_CROPS.iter().copied(), crop),
            price,
        },
    )
}

pub async fn government_schemes(current: CurrentUser, jar: CookieJar) -> AppResult<Page> {
    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        SchemesPage {
            layout: Layout::new(Some(&current), flashes),
            schemes: GOVERNMENT_SCHEMES.to_vec(),
        },
    )
}

pub async fn expert_advice(current: CurrentUser, jar: CookieJar) -> AppResult<Page> {
    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        ExpertAdvicePage {
            layout: Layout::new(Some(&current), flashes),
        },
    )
}

pub async fn soil_testing(
    State(state): State<AppState>,
    current: CurrentUser,
    jar: CookieJar,
) -> AppResult<Page> {
    let user = state.user_service.get_user(current.id).await?;
    let soil_type = user.soil_type.filter(|s| !s.trim().is_empty());

    let recommendations = match &soil_type {
        Some(soil) => soil_recommendations(soil),
        None => SOIL_TESTING_TIPS,
    };

    let (jar, flashes) = flash::take(jar);
    render(
        jar,
        SoilTestingPage {
            layout: Layout::new(Some(&current), flashes),
            soil_type,
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
            checked_on: Utc::now().format("%d %b %Y").to_string(),
        },
    )
}

fn loan_page_view(
    layout: Layout,
    amount: String,
    rate: String,
    tenure: String,
    quote: Option<LoanQuote>,
) -> LoanPage {
    LoanPage {
        layout,
        amount,
        rate,
        tenure,
        emi: quote.map(|q| q.emi.to_string()).unwrap_or_default(),
        total_interest: quote.map(|q| q.total_interest.to_string()).unwrap_or_default(),
        total_payable: quote.map(|q| q.total_payable.to_string()).unwrap_or_default(),
        calculated: quote.is_some(),
    }
}

pub async fn loan_page(current: CurrentUser, jar: CookieJar) -> AppResult<Page> {
    let defaults = LoanTerms::default();
    let (jar, flashes) = flash::take(jar);

    render(
        jar,
        loan_page_view(
            Layout::new(Some(&current), flashes),
            defaults.principal.to_string(),
            defaults.annual_rate.to_string(),
            defaults.tenure_years.to_string(),
            None,
        ),
    )
}

pub async fn calculate_loan(
    current: CurrentUser,
    jar: CookieJar,
    Form(form): Form<LoanForm>,
) -> AppResult<Page> {
    let (jar, mut flashes) = flash::take(jar);

    let quote = match form.terms().map(|terms| terms.quote()) {
        Some(Ok(quote)) => Some(quote),
        Some(Err(e)) if e.is_user_facing() => {
            flashes.push(FlashMessage {
                level: FlashLevel::Danger,
                text: e.to_string(),
            });
            None
        }
        Some(Err(e)) => return Err(e),
        None => {
            flashes.push(FlashMessage {
                level: FlashLevel::Danger,
                text: "Please enter valid numbers for loan calculation".to_string(),
            });
            None
        }
    };

    render(
        jar,
        loan_page_view(
            Layout::new(Some(&current), flashes),
            form.loan_amount,
            form.interest_rate,
            form.loan_tenure,
            quote,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: &str, rate: &str, tenure: &str) -> LoanForm {
        LoanForm {
            loan_amount: amount.to_string(),
            interest_rate: rate.to_string(),
            loan_tenure: tenure.to_string(),
        }
    }

    #[test]
    fn test_loan_form_parses_numbers() {
        let terms = form("250000", " 8.5", "10").terms().unwrap();
        assert_eq!(terms.principal, 250_000.0);
        assert_eq!(terms.annual_rate, 8.5);
        assert_eq!(terms.tenure_years, 10);
    }

    #[test]
    fn test_loan_form_rejects_garbage() {
        assert!(form("lots", "7.5", "5").terms().is_none());
        assert!(form("1000", "7.5", "-2").terms().is_none());
    }
}
