//! Start-up schema management.
//!
//! Creates the tables, applies additive column migrations, backfills legacy
//! rows and seeds the singleton content. Every statement is idempotent so the
//! manager runs on each boot; only table creation and the admin seed abort
//! start-up, everything else is logged and skipped.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::footer_content::dtos::SocialMediaItemDto;
use crate::features::seo_settings::dtos::UpdateSeoSettingsDto;
use crate::features::seo_settings::services::insert_settings;

const CREATE_TABLES: &[(&str, &str)] = &[
    (
        "admin",
        r#"
        CREATE TABLE IF NOT EXISTS admin (
            id SERIAL PRIMARY KEY,
            username VARCHAR(255) UNIQUE NOT NULL,
            password VARCHAR(255) NOT NULL
        )"#,
    ),
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            slug VARCHAR(255) UNIQUE NOT NULL,
            description TEXT,
            thumbnail_url VARCHAR(500),
            category_type VARCHAR(50) DEFAULT 'product',
            parent_id INTEGER REFERENCES categories(id) ON DELETE CASCADE,
            level INTEGER DEFAULT 0,
            order_index INTEGER DEFAULT 0,
            is_active BOOLEAN DEFAULT TRUE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )"#,
    ),
    (
        "articles",
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id SERIAL PRIMARY KEY,
            title VARCHAR(500) NOT NULL,
            content TEXT NOT NULL,
            summary TEXT,
            featured_image_url VARCHAR(500),
            category_id INTEGER NOT NULL,
            published BOOLEAN DEFAULT FALSE,
            tags VARCHAR(1000),
            meta_title VARCHAR(255),
            meta_description TEXT,
            slug VARCHAR(500) UNIQUE NOT NULL,
            author_id INTEGER REFERENCES admin(id),
            view_count INTEGER DEFAULT 0,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
        )"#,
    ),
    (
        "posts",
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id SERIAL PRIMARY KEY,
            title VARCHAR(500) NOT NULL,
            content TEXT,
            summary TEXT,
            image_url VARCHAR(500),
            category_id INTEGER NOT NULL,
            published BOOLEAN DEFAULT TRUE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
        )"#,
    ),
    (
        "home_content",
        r#"
        CREATE TABLE IF NOT EXISTS home_content (
            id SERIAL PRIMARY KEY,
            hero_title VARCHAR(500) NOT NULL,
            hero_description TEXT,
            hero_stat1_number VARCHAR(50),
            hero_stat1_label VARCHAR(255),
            hero_stat2_number VARCHAR(50),
            hero_stat2_label VARCHAR(255),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )"#,
    ),
    (
        "footer_content",
        r#"
        CREATE TABLE IF NOT EXISTS footer_content (
            id SERIAL PRIMARY KEY,
            company_name VARCHAR(255) NOT NULL,
            address TEXT,
            phone VARCHAR(50),
            email VARCHAR(255),
            facebook_url VARCHAR(500),
            instagram_url VARCHAR(500),
            youtube_url VARCHAR(500),
            linkedin_url VARCHAR(500),
            copyright_text VARCHAR(500),
            description TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )"#,
    ),
    (
        "global_seo_settings",
        r#"
        CREATE TABLE IF NOT EXISTS global_seo_settings (
            id SERIAL PRIMARY KEY,
            site_name VARCHAR(255) NOT NULL,
            default_meta_title VARCHAR(255) NOT NULL,
            default_meta_description TEXT NOT NULL,
            default_og_image_url VARCHAR(500),
            google_analytics_id VARCHAR(100),
            google_search_console_id VARCHAR(255),
            facebook_app_id VARCHAR(100),
            twitter_handle VARCHAR(100),
            company_name VARCHAR(255) NOT NULL,
            company_description TEXT,
            company_address TEXT,
            company_phone VARCHAR(50),
            company_email VARCHAR(255),
            company_logo_url VARCHAR(500),
            business_hours VARCHAR(255),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )"#,
    ),
];

const MIGRATIONS: &[&str] = &[
    // categories
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS parent_id INTEGER REFERENCES categories(id) ON DELETE CASCADE",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS level INTEGER DEFAULT 0",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS order_index INTEGER DEFAULT 0",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS display_order INTEGER DEFAULT 0",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS is_active BOOLEAN DEFAULT TRUE",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS thumbnail_url VARCHAR(500)",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS category_type VARCHAR(50) DEFAULT 'product'",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS meta_title VARCHAR(255)",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS meta_description TEXT",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS meta_keywords VARCHAR(500)",
    "ALTER TABLE categories ADD COLUMN IF NOT EXISTS og_image_url VARCHAR(500)",
    // posts
    "ALTER TABLE posts ADD COLUMN IF NOT EXISTS views INTEGER DEFAULT 0",
    "ALTER TABLE posts ADD COLUMN IF NOT EXISTS meta_title VARCHAR(255)",
    "ALTER TABLE posts ADD COLUMN IF NOT EXISTS meta_description TEXT",
    "ALTER TABLE posts ADD COLUMN IF NOT EXISTS focus_keywords VARCHAR(500)",
    "ALTER TABLE posts ADD COLUMN IF NOT EXISTS og_image_url VARCHAR(500)",
    "ALTER TABLE posts ADD COLUMN IF NOT EXISTS slug VARCHAR(500)",
    // home_content
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS features_title VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS features_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS features_logo_url VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature1_icon VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature1_title VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature1_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature2_icon VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature2_title VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature2_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature3_icon VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature3_title VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature3_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature4_icon VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature4_title VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS feature4_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS meta_title VARCHAR(255)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS meta_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS meta_keywords VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS og_title VARCHAR(255)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS og_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS og_image_url VARCHAR(500)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS twitter_title VARCHAR(255)",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS twitter_description TEXT",
    "ALTER TABLE home_content ADD COLUMN IF NOT EXISTS twitter_image_url VARCHAR(500)",
    // footer_content
    "ALTER TABLE footer_content ADD COLUMN IF NOT EXISTS services TEXT DEFAULT '[]'",
    "ALTER TABLE footer_content ADD COLUMN IF NOT EXISTS social_media TEXT DEFAULT '[]'",
];

const HOME_FEATURE_BACKFILL: &str = r#"
    UPDATE home_content
    SET feature4_icon = COALESCE(feature4_icon, 'verified'),
        feature4_title = COALESCE(feature4_title, 'Uy Tín 37 Tỉnh Thành'),
        feature4_description = COALESCE(feature4_description, 'Đã hoàn thành hơn 500 dự án biệt thự và nhà ở trên toàn quốc, được khách hàng tin tưởng.'),
        features_title = COALESCE(features_title, 'Ưu Thế MMA Architectural Design'),
        feature1_icon = COALESCE(feature1_icon, 'architecture'),
        feature2_icon = COALESCE(feature2_icon, 'engineering'),
        feature3_icon = COALESCE(feature3_icon, 'business')
    WHERE feature4_title IS NULL OR feature4_title = ''
"#;

/// (name, slug, description)
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Mẫu Thiết Kế", "mau-thiet-ke", "Các mẫu thiết kế nhà hiện đại"),
    ("Tin Tức", "tin-tuc", "Tin tức về kiến trúc và xây dựng"),
    ("Sản Phẩm", "san-pham", "Sản phẩm và dịch vụ"),
    ("Báo Chí", "bao-chi", "Báo chí về công ty"),
];

const DEFAULT_SERVICES: &[&str] = &[
    "Thiết kế kiến trúc",
    "Thi công xây dựng",
    "Nội thất cao cấp",
    "Tư vấn phong thủy",
];

/// Footer social links for `handle` (`mmadesign` for the seed, `company` for the backfill)
fn default_social_media(handle: &str) -> Vec<SocialMediaItemDto> {
    [
        ("Facebook", format!("https://facebook.com/{}", handle), "facebook"),
        ("Instagram", format!("https://instagram.com/{}", handle), "photo_camera"),
        ("YouTube", format!("https://youtube.com/{}", handle), "play_circle"),
        (
            "LinkedIn",
            format!("https://linkedin.com/company/{}", handle),
            "business",
        ),
    ]
    .into_iter()
    .map(|(name, url, icon)| SocialMediaItemDto {
        name: name.to_string(),
        url,
        icon: icon.to_string(),
    })
    .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize seed data: {}", e)))
}

pub struct SchemaManager {
    pool: PgPool,
    admin_username: String,
    admin_password: String,
}

impl SchemaManager {
    pub fn new(pool: PgPool, auth: &AuthConfig) -> Self {
        Self {
            pool,
            admin_username: auth.admin_username.clone(),
            admin_password: auth.admin_password.clone(),
        }
    }

    /// Bring the schema up to date and seed defaults. Errors are fatal for start-up.
    pub async fn run(&self) -> Result<()> {
        self.create_tables().await?;
        self.apply_migrations().await;
        self.backfill().await;
        self.seed().await?;
        info!("Database schema ready");
        Ok(())
    }

    async fn create_tables(&self) -> Result<()> {
        for (table, ddl) in CREATE_TABLES {
            sqlx::query(ddl).execute(&self.pool).await.map_err(|e| {
                tracing::error!("Failed to create table {}: {:?}", table, e);
                AppError::Database(e)
            })?;
        }
        info!("Database tables created");
        Ok(())
    }

    async fn apply_migrations(&self) {
        let mut failed = 0;
        for migration in MIGRATIONS {
            if let Err(e) = sqlx::query(migration).execute(&self.pool).await {
                warn!("Migration warning ({}): {}", migration, e);
                failed += 1;
            }
        }
        info!(
            applied = MIGRATIONS.len() - failed,
            failed, "Column migrations completed"
        );
    }

    async fn backfill(&self) {
        self.execute_logged(
            "category order_index",
            "UPDATE categories SET order_index = id WHERE order_index = 0",
        )
        .await;
        self.execute_logged(
            "category display_order",
            "UPDATE categories SET display_order = id WHERE display_order = 0",
        )
        .await;
        self.execute_logged("home content features", HOME_FEATURE_BACKFILL)
            .await;
        self.execute_logged(
            "footer services",
            "UPDATE footer_content SET services = '[]' WHERE services IS NULL OR services = ''",
        )
        .await;

        match to_json(&default_social_media("company")) {
            Ok(social_media) => {
                let result = sqlx::query(
                    "UPDATE footer_content SET social_media = $1 \
                     WHERE social_media IS NULL OR social_media = '' OR social_media = '[]'",
                )
                .bind(social_media)
                .execute(&self.pool)
                .await;
                if let Err(e) = result {
                    warn!("Failed to backfill footer social media: {}", e);
                }
            }
            Err(e) => warn!("Failed to backfill footer social media: {}", e),
        }
    }

    async fn execute_logged(&self, what: &str, sql: &str) {
        match sqlx::query(sql).execute(&self.pool).await {
            Ok(result) if result.rows_affected() > 0 => {
                info!("Backfilled {} ({} rows)", what, result.rows_affected())
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to backfill {}: {}", what, e),
        }
    }

    async fn count(&self, table: &str) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {}: {:?}", table, e);
                AppError::Database(e)
            })
    }

    async fn seed(&self) -> Result<()> {
        self.seed_admin().await?;
        self.seed_categories().await?;
        self.seed_home_content().await?;
        self.seed_footer_content().await?;
        self.seed_seo_settings().await?;
        Ok(())
    }

    async fn seed_admin(&self) -> Result<()> {
        if self.count("admin").await? > 0 {
            return Ok(());
        }

        let hash = bcrypt::hash(&self.admin_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Failed to hash admin password: {}", e)))?;

        sqlx::query("INSERT INTO admin (username, password) VALUES ($1, $2)")
            .bind(&self.admin_username)
            .bind(hash)
            .execute(&self.pool)
            .await?;

        info!("Default admin user created (username: {})", self.admin_username);
        Ok(())
    }

    async fn seed_categories(&self) -> Result<()> {
        if self.count("categories").await? > 0 {
            return Ok(());
        }

        for &(name, slug, description) in DEFAULT_CATEGORIES {
            let result =
                sqlx::query("INSERT INTO categories (name, slug, description) VALUES ($1, $2, $3)")
                    .bind(name)
                    .bind(slug)
                    .bind(description)
                    .execute(&self.pool)
                    .await;
            if let Err(e) = result {
                warn!("Failed to seed category {}: {}", name, e);
            }
        }
        info!("Default categories seeded");
        Ok(())
    }

    async fn seed_home_content(&self) -> Result<()> {
        if self.count("home_content").await? > 0 {
            return Ok(());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO home_content (
                hero_title, hero_description, hero_stat1_number, hero_stat1_label,
                hero_stat2_number, hero_stat2_label, features_title, features_description,
                features_logo_url,
                feature1_icon, feature1_title, feature1_description,
                feature2_icon, feature2_title, feature2_description,
                feature3_icon, feature3_title, feature3_description,
                feature4_icon, feature4_title, feature4_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, '', '', $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind("MMA Architectural Design")
        .bind("Chuyên thiết kế và thi công biệt thự, nhà ở hiện đại với phong cách kiến trúc độc đáo")
        .bind("37")
        .bind("Tỉnh Thành Phủ Sóng")
        .bind("500+")
        .bind("Dự Án Biệt Thự/Nhà Ở Chuyên Nghiệp")
        .bind("Ưu Thế MMA Architectural Design")
        .bind("architecture")
        .bind("Thiết Kế Kiến Trúc Độc Đáo")
        .bind("Chuyên gia kiến trúc sư với hơn 10 năm kinh nghiệm, tạo ra những công trình biệt thự và nhà ở đẳng cấp.")
        .bind("engineering")
        .bind("Thi Công Chất Lượng Cao")
        .bind("Đội ngũ kỹ sư và công nhân tay nghề cao, sử dụng công nghệ hiện đại trong thi công.")
        .bind("business")
        .bind("Dịch Vụ Toàn Diện")
        .bind("Từ thiết kế kiến trúc, nội thất đến giám sát thi công và bàn giao hoàn thiện.")
        .bind("verified")
        .bind("Uy Tín 37 Tỉnh Thành")
        .bind("Đã hoàn thành hơn 500 dự án biệt thự và nhà ở trên toàn quốc, được khách hàng tin tưởng.")
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => info!("Default home content seeded"),
            Err(e) => warn!("Failed to seed home content: {}", e),
        }
        Ok(())
    }

    async fn seed_footer_content(&self) -> Result<()> {
        if self.count("footer_content").await? > 0 {
            return Ok(());
        }

        let services = to_json(&DEFAULT_SERVICES)?;
        let social_media = to_json(&default_social_media("mmadesign"))?;

        let result = sqlx::query(
            r#"
            INSERT INTO footer_content (
                company_name, address, phone, email, facebook_url, instagram_url,
                youtube_url, linkedin_url, copyright_text, description, services, social_media
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind("MMA Architectural Design")
        .bind("123 Đường ABC, Phường XYZ, Quận 1, TP.HCM")
        .bind("0123 456 789")
        .bind("contact@mmadesign.com")
        .bind("https://facebook.com/mmadesign")
        .bind("https://instagram.com/mmadesign")
        .bind("https://youtube.com/mmadesign")
        .bind("https://linkedin.com/company/mmadesign")
        .bind("© 2024 MMA Architectural Design. All rights reserved.")
        .bind("Chuyên thiết kế và thi công biệt thự, nhà ở hiện đại với phong cách kiến trúc độc đáo. Đội ngũ kiến trúc sư giàu kinh nghiệm, cam kết mang đến những công trình chất lượng cao.")
        .bind(services)
        .bind(social_media)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => info!("Default footer content seeded"),
            Err(e) => warn!("Failed to seed footer content: {}", e),
        }
        Ok(())
    }

    async fn seed_seo_settings(&self) -> Result<()> {
        if self.count("global_seo_settings").await? > 0 {
            return Ok(());
        }

        match insert_settings(&self.pool, &UpdateSeoSettingsDto::builtin()).await {
            Ok(()) => info!("Default global SEO settings seeded"),
            Err(e) => warn!("Failed to seed global SEO settings: {}", e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::footer_content::dtos::decode_json_list;
    use crate::shared::test_helpers::{test_auth_config, TestDatabase};

    const SEEDED_TABLES: [&str; 5] = [
        "admin",
        "categories",
        "home_content",
        "footer_content",
        "global_seo_settings",
    ];

    #[test]
    fn test_ddl_is_idempotent() {
        for (_, ddl) in CREATE_TABLES {
            assert!(ddl.contains("CREATE TABLE IF NOT EXISTS"), "{}", ddl);
        }
        for migration in MIGRATIONS {
            assert!(
                migration.starts_with("ALTER TABLE") && migration.contains("ADD COLUMN IF NOT EXISTS"),
                "{}",
                migration
            );
        }
    }

    #[test]
    fn test_referenced_tables_created_first() {
        let order: Vec<&str> = CREATE_TABLES.iter().map(|(name, _)| *name).collect();
        let pos = |name: &str| order.iter().position(|t| *t == name).unwrap();
        assert!(pos("admin") < pos("articles"));
        assert!(pos("categories") < pos("articles"));
        assert!(pos("categories") < pos("posts"));
    }

    #[test]
    fn test_default_categories_use_url_safe_slugs() {
        for (name, slug, _) in DEFAULT_CATEGORIES {
            assert_eq!(crate::shared::slug::slugify(name), *slug);
        }
    }

    #[test]
    fn test_seed_json_decodes_as_footer_lists() {
        let services = to_json(&DEFAULT_SERVICES).unwrap();
        let decoded: Vec<String> = decode_json_list(&services, "services");
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded[3], "Tư vấn phong thủy");

        let social = to_json(&default_social_media("mmadesign")).unwrap();
        let decoded: Vec<SocialMediaItemDto> = decode_json_list(&social, "social_media");
        assert_eq!(decoded[1].icon, "photo_camera");
        assert_eq!(decoded[3].url, "https://linkedin.com/company/mmadesign");
    }

    #[tokio::test]
    async fn test_rerun_keeps_seeded_rows() {
        let Some(db) = TestDatabase::connect("test_rerun_keeps_seeded_rows").await else {
            return;
        };

        let mut before = Vec::new();
        for table in SEEDED_TABLES {
            before.push(db.count(table).await);
        }
        assert_eq!(before, vec![1, DEFAULT_CATEGORIES.len() as i64, 1, 1, 1]);

        SchemaManager::new(db.pool.clone(), &test_auth_config())
            .run()
            .await
            .unwrap();

        let mut after = Vec::new();
        for table in SEEDED_TABLES {
            after.push(db.count(table).await);
        }
        assert_eq!(before, after);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_seeded_admin_password_is_hashed() {
        let Some(db) = TestDatabase::connect("test_seeded_admin_password_is_hashed").await else {
            return;
        };

        let (username, hash): (String, String) =
            sqlx::query_as("SELECT username, password FROM admin ORDER BY id LIMIT 1")
                .fetch_one(&db.pool)
                .await
                .unwrap();
        assert_eq!(username, "admin");
        assert_ne!(hash, "admin123");
        assert!(bcrypt::verify("admin123", &hash).unwrap());

        db.drop_schema().await;
    }
}
