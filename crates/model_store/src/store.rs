use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use sea_orm::sea_query::{
    Asterisk, Expr, Order, PostgresQueryBuilder, Query, QueryStatementWriter, SimpleExpr,
    SqliteQueryBuilder,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, QueryResult,
    Statement,
};
use sea_orm_migration::MigratorTrait;
use time::OffsetDateTime;

use crate::migration::Migrator;
use crate::service::EntityService;
use crate::stored::{StoredEntity, WriteKind};
use crate::{StoreConfig, ValidationMode};
use lpforge_model_core::{
    Constraint, DecisionVariable, ModelError, ModelResult, ObjectiveFunction, Parameter, Set,
};

/// Pooled connection to the entity tables.
///
/// Cloning is cheap and shares the pool. Every repository call is a single
/// statement; nothing here opens a transaction.
#[derive(Clone)]
pub struct ModelStore {
    conn: DatabaseConnection,
    backend: DatabaseBackend,
    reference_checks: ValidationMode,
    failpoints: HashSet<String>,
}

impl ModelStore {
    pub async fn connect(config: &StoreConfig, base_dir: &Path) -> ModelResult<Self> {
        let url = config.connection_url(base_dir)?;
        let mut options = ConnectOptions::new(url);
        options.sqlx_logging_level(log::LevelFilter::Debug);
        if let Some(pool) = &config.pool {
            if let Some(max) = pool.max_connections {
                options.max_connections(max);
            }
            if let Some(min) = pool.min_connections {
                options.min_connections(min);
            }
            if let Some(timeout_ms) = pool.connect_timeout_ms {
                options.connect_timeout(Duration::from_millis(timeout_ms));
            }
            if let Some(timeout_ms) = pool.acquire_timeout_ms {
                options.acquire_timeout(Duration::from_millis(timeout_ms));
            }
            if let Some(timeout_ms) = pool.idle_timeout_ms {
                options.idle_timeout(Duration::from_millis(timeout_ms));
            }
        }
        let conn = Database::connect(options).await.map_err(ModelError::from)?;
        let backend = conn.get_database_backend();
        let failpoints = config
            .failpoints
            .clone()
            .unwrap_or_default()
            .into_iter()
            .collect::<HashSet<_>>();
        let store = Self {
            conn,
            backend,
            reference_checks: config.reference_checks(),
            failpoints,
        };
        Migrator::up(&store.conn, None)
            .await
            .map_err(ModelError::from)?;
        log::info!(
            "store: connected backend={} reference_checks={:?}",
            config.backend_name(),
            store.reference_checks
        );
        Ok(store)
    }

    /// Opens the store configured in `base_dir`, initialising `lpforge.json` if absent.
    pub async fn open(base_dir: &Path) -> ModelResult<Self> {
        let config = StoreConfig::load_or_init(base_dir)?;
        Self::connect(&config, base_dir).await
    }

    pub async fn connect_sqlite(path: &Path) -> ModelResult<Self> {
        let config = StoreConfig::default_sqlite(path.to_string_lossy());
        Self::connect(&config, path.parent().unwrap_or_else(|| Path::new("."))).await
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::MySql => "mysql",
            _ => "sqlite",
        }
    }

    pub fn reference_checks(&self) -> ValidationMode {
        self.reference_checks
    }

    pub async fn ping(&self) -> ModelResult<()> {
        self.conn.ping().await?;
        Ok(())
    }

    pub fn service<E: StoredEntity>(&self) -> EntityService<E> {
        EntityService::new(self.clone())
    }

    pub fn sets(&self) -> EntityService<Set> {
        self.service()
    }

    pub fn parameters(&self) -> EntityService<Parameter> {
        self.service()
    }

    pub fn decision_variables(&self) -> EntityService<DecisionVariable> {
        self.service()
    }

    pub fn constraints(&self) -> EntityService<Constraint> {
        self.service()
    }

    pub fn objective_functions(&self) -> EntityService<ObjectiveFunction> {
        self.service()
    }

    pub(crate) fn maybe_failpoint(&self, key: &str) -> ModelResult<()> {
        if self.failpoints.contains(key) {
            Err(ModelError::storage(format!("failpoint {key}")))
        } else {
            Ok(())
        }
    }

    pub(crate) async fn insert_row<E: StoredEntity>(&self, fields: &E::Fields) -> ModelResult<E> {
        self.maybe_failpoint("before_insert")?;
        let values = E::write_values(fields, WriteKind::Insert, OffsetDateTime::now_utc())?;
        let (columns, exprs): (Vec<E::Column>, Vec<SimpleExpr>) = values
            .into_iter()
            .map(|(column, value)| (column, SimpleExpr::from(value)))
            .unzip();
        let mut insert = Query::insert();
        insert.into_table(E::TABLE).columns(columns);
        insert
            .values(exprs)
            .map_err(|err| ModelError::storage(format!("build insert: {err}")))?;
        insert.returning_all();
        let row = query_one(&self.conn, &insert)
            .await?
            .ok_or_else(|| ModelError::storage("insert returned no row"))?;
        E::from_row(&row)
    }

    pub(crate) async fn select_all<E: StoredEntity>(&self) -> ModelResult<Vec<E>> {
        self.maybe_failpoint("before_select")?;
        let select = Query::select()
            .column(Asterisk)
            .from(E::TABLE)
            .order_by(E::ID, Order::Asc)
            .to_owned();
        query_all(&self.conn, &select)
            .await?
            .iter()
            .map(E::from_row)
            .collect()
    }

    pub(crate) async fn select_one<E: StoredEntity>(&self, id: i64) -> ModelResult<Option<E>> {
        self.maybe_failpoint("before_select")?;
        let select = Query::select()
            .column(Asterisk)
            .from(E::TABLE)
            .and_where(Expr::col(E::ID).eq(id))
            .limit(1)
            .to_owned();
        query_one(&self.conn, &select)
            .await?
            .as_ref()
            .map(E::from_row)
            .transpose()
    }

    pub(crate) async fn update_row<E: StoredEntity>(
        &self,
        id: i64,
        fields: &E::Fields,
    ) -> ModelResult<Option<E>> {
        self.maybe_failpoint("before_update")?;
        let values = E::write_values(fields, WriteKind::Update, OffsetDateTime::now_utc())?;
        let update = Query::update()
            .table(E::TABLE)
            .values(
                values
                    .into_iter()
                    .map(|(column, value)| (column, SimpleExpr::from(value))),
            )
            .and_where(Expr::col(E::ID).eq(id))
            .returning_all()
            .to_owned();
        query_one(&self.conn, &update)
            .await?
            .as_ref()
            .map(E::from_row)
            .transpose()
    }

    pub(crate) async fn delete_row<E: StoredEntity>(&self, id: i64) -> ModelResult<Option<E>> {
        self.maybe_failpoint("before_delete")?;
        let delete = Query::delete()
            .from_table(E::TABLE)
            .and_where(Expr::col(E::ID).eq(id))
            .returning_all()
            .to_owned();
        query_one(&self.conn, &delete)
            .await?
            .as_ref()
            .map(E::from_row)
            .transpose()
    }
}

fn build_stmt<S: QueryStatementWriter>(
    backend: DatabaseBackend,
    stmt: &S,
) -> (String, sea_orm::sea_query::Values) {
    match backend {
        DatabaseBackend::Postgres => stmt.build(PostgresQueryBuilder),
        _ => stmt.build(SqliteQueryBuilder),
    }
}

pub(crate) async fn query_all<C, S>(conn: &C, stmt: &S) -> ModelResult<Vec<QueryResult>>
where
    C: ConnectionTrait,
    S: QueryStatementWriter,
{
    let backend = conn.get_database_backend();
    let (sql, values) = build_stmt(backend, stmt);
    let rows = conn
        .query_all(Statement::from_sql_and_values(backend, sql, values))
        .await?;
    Ok(rows)
}

pub(crate) async fn query_one<C, S>(conn: &C, stmt: &S) -> ModelResult<Option<QueryResult>>
where
    C: ConnectionTrait,
    S: QueryStatementWriter,
{
    let backend = conn.get_database_backend();
    let (sql, values) = build_stmt(backend, stmt);
    let row = conn
        .query_one(Statement::from_sql_and_values(backend, sql, values))
        .await?;
    Ok(row)
}
