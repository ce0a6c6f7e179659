use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub id: String,
    pub pw: String,
    pub name: Option<String>,
    pub nickname: Option<String>,
    /// `ADMIN` or `STAFF` (default).
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub captcha_key: Option<String>,
    pub captcha_val: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub id: String, pub pw: String }

#[derive(ToSchema)]
pub struct ProfileUpdateRequest {
    pub id: String,
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub new_password: Option<String>,
}

#[derive(ToSchema)]
pub struct NewProductRequest {
    pub item_code: String,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub stock: Option<i32>,
}

#[derive(ToSchema)]
pub struct StockUpdateRequest { pub item_code: String, pub new_stock: i32 }

#[derive(ToSchema)]
pub struct ItemCodeRequest { pub item_code: String }

#[derive(ToSchema)]
pub struct NewOrderRequest {
    pub company: String,
    pub item_name: String,
    pub quantity: Option<i32>,
    pub order_date: Option<String>,
    pub due_date: Option<String>,
    pub contact: Option<String>,
    pub price: Option<i64>,
    pub note: Option<String>,
}

#[derive(ToSchema)]
pub struct StatusUpdateRequest { pub id: i32, pub status: String }

#[derive(ToSchema)]
pub struct CartItemDoc {
    pub product_name: Option<String>,
    pub name: Option<String>,
    pub item_name: Option<String>,
    pub brand: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<i64>,
}

#[derive(ToSchema)]
pub struct CartRequest { pub user_id: Option<String>, pub items: Vec<CartItemDoc> }

#[derive(ToSchema)]
pub struct FactoryRequestDoc { pub user_id: Option<String>, pub orders: Vec<CartItemDoc> }

#[derive(ToSchema)]
pub struct SlotRequest {
    pub slot_id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub is_active: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::accounts::check_id,
        crate::routes::accounts::register,
        crate::routes::accounts::login,
        crate::routes::accounts::update_profile,
        crate::routes::accounts::upload_image,
        crate::routes::catalog::list,
        crate::routes::catalog::add,
        crate::routes::catalog::update_stock,
        crate::routes::catalog::delete,
        crate::routes::orders::list,
        crate::routes::orders::my_list,
        crate::routes::orders::add,
        crate::routes::orders::complete_payment,
        crate::routes::orders::update_status,
        crate::routes::orders::delete,
        crate::routes::orders::process_order,
        crate::routes::orders::recent,
        crate::routes::slots::list,
        crate::routes::slots::save,
        crate::routes::slots::delete,
        crate::routes::search::naver_search,
        crate::routes::search::shop_search,
        crate::routes::search::captcha_key,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ProfileUpdateRequest,
            NewProductRequest,
            StockUpdateRequest,
            ItemCodeRequest,
            NewOrderRequest,
            StatusUpdateRequest,
            CartItemDoc,
            CartRequest,
            FactoryRequestDoc,
            SlotRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts"),
        (name = "catalog"),
        (name = "orders"),
        (name = "factory"),
        (name = "slots"),
        (name = "search")
    )
)]
pub struct ApiDoc;
