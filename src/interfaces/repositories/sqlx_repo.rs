use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxPostRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}
