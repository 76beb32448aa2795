//! Audit log database operations

use log::{debug, warn};
use sqlx::{QueryBuilder, Sqlite};

use super::AppState;
use crate::audit::models::{
    AuditEntry, AuditFilter, AuditStats, MonthCount, NewAuditEntry, ServiceTypeCount,
};

impl AppState {
    pub async fn init_audit_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                ot_number TEXT NOT NULL UNIQUE,
                expediente TEXT NOT NULL,
                proforma_number TEXT NOT NULL,
                cliente TEXT NOT NULL,
                ruc_cliente TEXT NOT NULL,
                total_items INTEGER NOT NULL,
                tipo_servicio TEXT,
                fecha_emision TEXT,
                fecha_entrega TEXT,
                estado TEXT DEFAULT 'APROBADA',
                usuario TEXT,
                ip_address TEXT,
                filepath TEXT,
                metadata TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_ot_number ON audit_log(ot_number)",
            "CREATE INDEX IF NOT EXISTS idx_proforma ON audit_log(proforma_number)",
            "CREATE INDEX IF NOT EXISTS idx_fecha ON audit_log(timestamp)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }

    /// Register a generated OT. Returns `false` when the OT number is already taken.
    pub async fn register_ot(
        &self,
        entry: &NewAuditEntry,
        filepath: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO audit_log (
                timestamp, ot_number, expediente, proforma_number,
                cliente, ruc_cliente, total_items, tipo_servicio,
                fecha_emision, fecha_entrega, estado, ip_address, filepath, metadata
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'APROBADA', ?, ?, ?)
            "#,
        )
        .bind(entry.timestamp_text())
        .bind(&entry.ot_number)
        .bind(&entry.expediente)
        .bind(&entry.proforma_number)
        .bind(&entry.cliente)
        .bind(&entry.ruc_cliente)
        .bind(entry.total_items)
        .bind(&entry.tipo_servicio)
        .bind(&entry.fecha_emision)
        .bind(&entry.fecha_entrega)
        .bind(entry.ip_address.as_deref())
        .bind(filepath)
        .bind(entry.metadata.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!("Audit entry registered for {}", entry.ot_number);
                Ok(true)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("{} is already registered in the audit log", entry.ot_number);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Entries matching `filter`, newest first.
    pub async fn audit_entries(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, sqlx::Error> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, timestamp, ot_number, expediente, proforma_number, cliente, ruc_cliente, \
             total_items, tipo_servicio, fecha_emision, fecha_entrega, estado, usuario, \
             ip_address, filepath, metadata FROM audit_log WHERE 1=1",
        );

        if let Some(start) = filter.start_date {
            query
                .push(" AND DATE(timestamp) >= ")
                .push_bind(start.format("%Y-%m-%d").to_string());
        }
        if let Some(end) = filter.end_date {
            query
                .push(" AND DATE(timestamp) <= ")
                .push_bind(end.format("%Y-%m-%d").to_string());
        }
        if let Some(cliente) = filter.cliente.as_deref().filter(|c| !c.is_empty()) {
            query
                .push(" AND cliente LIKE ")
                .push_bind(format!("%{}%", cliente));
        }
        query.push(" ORDER BY timestamp DESC, id DESC");

        query
            .build_query_as::<AuditEntry>()
            .fetch_all(&self.pool)
            .await
    }

    pub async fn audit_statistics(&self) -> Result<AuditStats, sqlx::Error> {
        let total_ots: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_log")
            .fetch_one(&self.pool)
            .await?;

        let por_mes = sqlx::query_as::<_, MonthCount>(
            r#"
            SELECT strftime('%Y-%m', timestamp) AS mes, COUNT(*) AS cantidad
            FROM audit_log
            WHERE strftime('%Y-%m', timestamp) IS NOT NULL
            GROUP BY mes
            ORDER BY mes DESC
            LIMIT 12
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let clientes_unicos: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT ruc_cliente) FROM audit_log")
                .fetch_one(&self.pool)
                .await?;

        let por_tipo = sqlx::query_as::<_, ServiceTypeCount>(
            r#"
            SELECT tipo_servicio, COUNT(*) AS cantidad
            FROM audit_log
            GROUP BY tipo_servicio
            ORDER BY cantidad DESC, tipo_servicio
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(AuditStats {
            total_ots,
            por_mes,
            clientes_unicos,
            por_tipo,
        })
    }
}
