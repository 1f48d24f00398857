//! Request body shapes for the generated API docs. Field names match the JSON
//! the handlers accept (camelCase, like the backend).

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub version: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LoginRequestDoc { pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AccountFormDoc {
    pub full_name: String,
    pub email: String,
    /// Exactly 10 digits.
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BusinessFormDoc { pub business_name: String, pub address: String }

#[derive(ToSchema)]
pub struct CodeSelectionDoc { pub code: String }

#[derive(ToSchema)]
pub struct OtpDoc {
    /// Six digits.
    pub otp: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceFormDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Minutes, 1..=1440.
    pub duration: u32,
    pub category_id: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct StaffFormDoc {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub branch_id: String,
    pub position: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BranchFormDoc {
    pub branch_name: String,
    pub street: String,
    pub district: String,
    pub province: String,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PromotionFormDoc {
    pub promotion_name: String,
    pub description: Option<String>,
    /// Either the percent or the amount, not both.
    pub discount_percent: f64,
    pub discount_amount: f64,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct FlashSaleFormDoc {
    pub service_id: String,
    pub discount_percent: f64,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct WorkingHourFormDoc {
    pub branch_id: String,
    /// 0 = Sunday.
    pub day_of_week: u8,
    /// `HH:MM`, required when working.
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub is_working: bool,
}

#[derive(ToSchema)]
pub struct StatusUpdateDoc {
    /// Pending, Confirmed, InProgress, Completed, Cancelled or NoShow.
    pub status: String,
    pub note: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::registration::start,
        crate::routes::registration::get_draft,
        crate::routes::registration::edit_account,
        crate::routes::registration::back,
        crate::routes::registration::select_province,
        crate::routes::registration::select_district,
        crate::routes::registration::submit_business,
        crate::routes::registration::verify_otp,
        crate::routes::registration::resend_otp,
        crate::routes::geo::provinces,
        crate::routes::geo::districts,
        crate::routes::uploads::upload_image,
        crate::routes::services::page,
        crate::routes::services::get_one,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::staff::page,
        crate::routes::staff::get_one,
        crate::routes::staff::create,
        crate::routes::staff::update,
        crate::routes::staff::delete,
        crate::routes::branches::page,
        crate::routes::branches::get_one,
        crate::routes::branches::create,
        crate::routes::branches::update,
        crate::routes::branches::delete,
        crate::routes::promotions::page,
        crate::routes::promotions::get_one,
        crate::routes::promotions::create,
        crate::routes::promotions::update,
        crate::routes::promotions::delete,
        crate::routes::flash_sales::page,
        crate::routes::flash_sales::get_one,
        crate::routes::flash_sales::create,
        crate::routes::flash_sales::update,
        crate::routes::flash_sales::delete,
        crate::routes::working_hours::page,
        crate::routes::working_hours::create,
        crate::routes::working_hours::update,
        crate::routes::working_hours::delete,
        crate::routes::appointments::page,
        crate::routes::appointments::get_one,
        crate::routes::appointments::change_status,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequestDoc,
            AccountFormDoc,
            BusinessFormDoc,
            CodeSelectionDoc,
            OtpDoc,
            ServiceFormDoc,
            StaffFormDoc,
            BranchFormDoc,
            PromotionFormDoc,
            FlashSaleFormDoc,
            WorkingHourFormDoc,
            StatusUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "registration"),
        (name = "geo"),
        (name = "uploads"),
        (name = "services"),
        (name = "staff"),
        (name = "branches"),
        (name = "promotions"),
        (name = "flash-sales"),
        (name = "working-hours"),
        (name = "appointments")
    )
)]
pub struct ApiDoc;
