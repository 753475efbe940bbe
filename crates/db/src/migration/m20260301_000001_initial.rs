//! Initial database migration.
//!
//! Creates all enums, tables, triggers, and indexes for the yard schema,
//! then seeds the settings singleton and the standard vaccination types.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: YARD TABLES
        // ============================================================
        db.execute_unprepared(OWNERS_SQL).await?;
        db.execute_unprepared(HORSES_SQL).await?;
        db.execute_unprepared(LOCATIONS_SQL).await?;
        db.execute_unprepared(OWNERSHIPS_SQL).await?;
        db.execute_unprepared(RATE_TYPES_SQL).await?;
        db.execute_unprepared(PLACEMENTS_SQL).await?;

        // ============================================================
        // PART 3: BILLING TABLES
        // ============================================================
        db.execute_unprepared(SERVICE_PROVIDERS_SQL).await?;
        db.execute_unprepared(BUSINESS_SETTINGS_SQL).await?;
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_LINE_ITEMS_SQL).await?;
        db.execute_unprepared(EXTRA_CHARGES_SQL).await?;

        // ============================================================
        // PART 4: HEALTH TABLES
        // ============================================================
        db.execute_unprepared(VACCINATION_TYPES_SQL).await?;
        db.execute_unprepared(VACCINATIONS_SQL).await?;
        db.execute_unprepared(FARRIER_VISITS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        // ============================================================
        // PART 6: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_SETTINGS_SQL).await?;
        db.execute_unprepared(SEED_VACCINATION_TYPES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Horse sex
CREATE TYPE horse_sex AS ENUM ('mare', 'gelding', 'stallion', 'colt', 'filly');

-- Rate charging basis
CREATE TYPE rate_basis AS ENUM ('per_day', 'per_month');

-- Service provider categories
CREATE TYPE provider_type AS ENUM (
    'vet',
    'farrier',
    'dentist',
    'physio',
    'saddler',
    'other'
);

-- Extra charge categories
CREATE TYPE charge_type AS ENUM (
    'vet',
    'farrier',
    'vaccination',
    'feed',
    'medication',
    'transport',
    'equipment',
    'dentist',
    'physio',
    'other'
);

-- Invoice lifecycle
CREATE TYPE invoice_status AS ENUM ('draft', 'sent', 'paid', 'overdue');

-- Invoice line categories
CREATE TYPE line_type AS ENUM (
    'livery',
    'vet',
    'farrier',
    'vaccination',
    'feed',
    'other'
);

-- Farrier work performed
CREATE TYPE farrier_work AS ENUM (
    'trim',
    'front_shoes',
    'full_set',
    'remedial',
    'remove'
);
";

const OWNERS_SQL: &str = r"
CREATE TABLE owners (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    address TEXT,
    account_code TEXT,
    notes TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_owners_name ON owners (name);
";

const HORSES_SQL: &str = r"
CREATE TABLE horses (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    date_of_birth DATE,
    age_years SMALLINT CHECK (age_years IS NULL OR age_years >= 0),
    color TEXT,
    sex horse_sex,
    breeding_notes TEXT,
    sire_name TEXT,
    passport_number TEXT,
    has_passport BOOLEAN NOT NULL DEFAULT TRUE,
    notes TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_horses_name ON horses (name);
CREATE INDEX idx_horses_is_active ON horses (is_active);
";

const LOCATIONS_SQL: &str = r"
CREATE TABLE locations (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    site TEXT NOT NULL,
    description TEXT,
    capacity INTEGER CHECK (capacity IS NULL OR capacity > 0),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_locations_site ON locations (site, name);
";

const OWNERSHIPS_SQL: &str = r"
-- Half-open ownership windows [start_date, end_date); end NULL = current.
CREATE TABLE ownerships (
    id UUID PRIMARY KEY,
    horse_id UUID NOT NULL REFERENCES horses (id) ON DELETE CASCADE,
    owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE RESTRICT,
    start_date DATE NOT NULL,
    end_date DATE CHECK (end_date IS NULL OR end_date > start_date),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_ownerships_horse ON ownerships (horse_id, start_date);
CREATE INDEX idx_ownerships_owner ON ownerships (owner_id);

-- One current owner per horse.
CREATE UNIQUE INDEX uq_ownerships_open
    ON ownerships (horse_id)
    WHERE end_date IS NULL;
";

const RATE_TYPES_SQL: &str = r"
CREATE TABLE rate_types (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    basis rate_basis NOT NULL DEFAULT 'per_day',
    amount NUMERIC(8, 2) NOT NULL CHECK (amount >= 0),
    description TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PLACEMENTS_SQL: &str = r"
-- Half-open placement windows [start_date, end_date); end NULL = current.
CREATE TABLE placements (
    id UUID PRIMARY KEY,
    horse_id UUID NOT NULL REFERENCES horses (id) ON DELETE CASCADE,
    location_id UUID NOT NULL REFERENCES locations (id) ON DELETE RESTRICT,
    rate_type_id UUID NOT NULL REFERENCES rate_types (id) ON DELETE RESTRICT,
    start_date DATE NOT NULL,
    end_date DATE CHECK (end_date IS NULL OR end_date > start_date),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_placements_horse ON placements (horse_id, start_date);
CREATE INDEX idx_placements_location ON placements (location_id);

-- At most one open placement per horse.
CREATE UNIQUE INDEX uq_placements_open
    ON placements (horse_id)
    WHERE end_date IS NULL;
";

const SERVICE_PROVIDERS_SQL: &str = r"
CREATE TABLE service_providers (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    provider_type provider_type NOT NULL DEFAULT 'other',
    phone TEXT,
    email TEXT,
    address TEXT,
    notes TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const BUSINESS_SETTINGS_SQL: &str = r"
-- Singleton: the CHECK pins the only row to id = 1.
CREATE TABLE business_settings (
    id SMALLINT PRIMARY KEY CHECK (id = 1),
    business_name TEXT NOT NULL DEFAULT 'Horse Livery',
    address TEXT,
    phone TEXT,
    email TEXT,
    website TEXT,
    vat_registration TEXT NOT NULL DEFAULT 'N/A',
    bank_details TEXT,
    default_payment_terms_days SMALLINT NOT NULL DEFAULT 30,
    invoice_prefix TEXT NOT NULL DEFAULT 'INV',
    next_invoice_number INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const INVOICES_SQL: &str = r"
-- Billing periods are half-open [period_start, period_end).
CREATE TABLE invoices (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE RESTRICT,
    invoice_number TEXT NOT NULL UNIQUE,
    period_start DATE NOT NULL,
    period_end DATE NOT NULL CHECK (period_end > period_start),
    status invoice_status NOT NULL DEFAULT 'draft',
    subtotal NUMERIC(10, 2) NOT NULL DEFAULT 0,
    total NUMERIC(10, 2) NOT NULL DEFAULT 0,
    payment_terms_days SMALLINT NOT NULL DEFAULT 30,
    due_date DATE NOT NULL,
    notes TEXT,
    reminder_sent_on DATE,
    sent_at TIMESTAMPTZ,
    paid_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_invoices_owner ON invoices (owner_id, period_start);
CREATE INDEX idx_invoices_status ON invoices (status, due_date);

-- One non-draft invoice per owner and period: concurrent generation
-- attempts serialize through conflict rejection, not locking.
CREATE UNIQUE INDEX uq_invoices_owner_period
    ON invoices (owner_id, period_start, period_end)
    WHERE status <> 'draft';
";

const INVOICE_LINE_ITEMS_SQL: &str = r"
CREATE TABLE invoice_line_items (
    id UUID PRIMARY KEY,
    invoice_id UUID NOT NULL REFERENCES invoices (id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    horse_id UUID REFERENCES horses (id) ON DELETE SET NULL,
    placement_id UUID REFERENCES placements (id) ON DELETE SET NULL,
    extra_charge_id UUID,
    line_type line_type NOT NULL DEFAULT 'livery',
    description TEXT NOT NULL,
    quantity NUMERIC(10, 2) NOT NULL DEFAULT 1,
    unit_price NUMERIC(10, 2) NOT NULL,
    line_total NUMERIC(10, 2) NOT NULL,
    UNIQUE (invoice_id, line_no)
);
";

const EXTRA_CHARGES_SQL: &str = r"
CREATE TABLE extra_charges (
    id UUID PRIMARY KEY,
    horse_id UUID NOT NULL REFERENCES horses (id) ON DELETE CASCADE,
    owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE RESTRICT,
    service_provider_id UUID REFERENCES service_providers (id) ON DELETE SET NULL,
    charge_type charge_type NOT NULL DEFAULT 'other',
    date DATE NOT NULL,
    description TEXT NOT NULL,
    amount NUMERIC(10, 2) NOT NULL CHECK (amount >= 0),
    invoiced BOOLEAN NOT NULL DEFAULT FALSE,
    invoice_id UUID REFERENCES invoices (id) ON DELETE SET NULL,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_extra_charges_owner_unbilled
    ON extra_charges (owner_id, date)
    WHERE invoiced = FALSE;

ALTER TABLE invoice_line_items
    ADD CONSTRAINT fk_line_items_extra_charge
    FOREIGN KEY (extra_charge_id) REFERENCES extra_charges (id) ON DELETE SET NULL;
";

const VACCINATION_TYPES_SQL: &str = r"
CREATE TABLE vaccination_types (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    interval_months SMALLINT NOT NULL DEFAULT 12 CHECK (interval_months > 0),
    reminder_days_before SMALLINT NOT NULL DEFAULT 30 CHECK (reminder_days_before >= 0),
    description TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const VACCINATIONS_SQL: &str = r"
CREATE TABLE vaccinations (
    id UUID PRIMARY KEY,
    horse_id UUID NOT NULL REFERENCES horses (id) ON DELETE CASCADE,
    vaccination_type_id UUID NOT NULL REFERENCES vaccination_types (id) ON DELETE RESTRICT,
    date_given DATE NOT NULL,
    next_due_date DATE NOT NULL,
    vet_name TEXT,
    batch_number TEXT,
    notes TEXT,
    reminder_sent_on DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_vaccinations_due ON vaccinations (next_due_date);
";

const FARRIER_VISITS_SQL: &str = r"
CREATE TABLE farrier_visits (
    id UUID PRIMARY KEY,
    horse_id UUID NOT NULL REFERENCES horses (id) ON DELETE CASCADE,
    service_provider_id UUID REFERENCES service_providers (id) ON DELETE SET NULL,
    date DATE NOT NULL,
    work_done farrier_work NOT NULL DEFAULT 'trim',
    next_due_date DATE NOT NULL,
    cost NUMERIC(8, 2) NOT NULL DEFAULT 0,
    extra_charge_id UUID REFERENCES extra_charges (id) ON DELETE SET NULL,
    notes TEXT,
    reminder_sent_on DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_farrier_visits_due ON farrier_visits (next_due_date);
";

const TRIGGERS_SQL: &str = r"
-- Maintain updated_at on every write.
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_owners_updated_at BEFORE UPDATE ON owners
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_horses_updated_at BEFORE UPDATE ON horses
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_locations_updated_at BEFORE UPDATE ON locations
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_ownerships_updated_at BEFORE UPDATE ON ownerships
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_rate_types_updated_at BEFORE UPDATE ON rate_types
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_placements_updated_at BEFORE UPDATE ON placements
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_service_providers_updated_at BEFORE UPDATE ON service_providers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_business_settings_updated_at BEFORE UPDATE ON business_settings
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_invoices_updated_at BEFORE UPDATE ON invoices
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_extra_charges_updated_at BEFORE UPDATE ON extra_charges
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_vaccination_types_updated_at BEFORE UPDATE ON vaccination_types
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_vaccinations_updated_at BEFORE UPDATE ON vaccinations
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_farrier_visits_updated_at BEFORE UPDATE ON farrier_visits
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const SEED_SETTINGS_SQL: &str = r"
INSERT INTO business_settings (id) VALUES (1)
ON CONFLICT (id) DO NOTHING;
";

const SEED_VACCINATION_TYPES_SQL: &str = r"
INSERT INTO vaccination_types (id, name, interval_months, reminder_days_before, description)
VALUES
    (gen_random_uuid(), 'Equine Influenza', 12, 30, 'Annual flu booster'),
    (gen_random_uuid(), 'Tetanus', 24, 30, 'Two-yearly tetanus booster'),
    (gen_random_uuid(), 'EHV', 6, 14, 'Equine herpes virus booster');
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS farrier_visits CASCADE;
DROP TABLE IF EXISTS vaccinations CASCADE;
DROP TABLE IF EXISTS vaccination_types CASCADE;
DROP TABLE IF EXISTS extra_charges CASCADE;
DROP TABLE IF EXISTS invoice_line_items CASCADE;
DROP TABLE IF EXISTS invoices CASCADE;
DROP TABLE IF EXISTS business_settings CASCADE;
DROP TABLE IF EXISTS service_providers CASCADE;
DROP TABLE IF EXISTS placements CASCADE;
DROP TABLE IF EXISTS rate_types CASCADE;
DROP TABLE IF EXISTS ownerships CASCADE;
DROP TABLE IF EXISTS locations CASCADE;
DROP TABLE IF EXISTS horses CASCADE;
DROP TABLE IF EXISTS owners CASCADE;

DROP FUNCTION IF EXISTS set_updated_at CASCADE;

DROP TYPE IF EXISTS farrier_work;
DROP TYPE IF EXISTS line_type;
DROP TYPE IF EXISTS invoice_status;
DROP TYPE IF EXISTS charge_type;
DROP TYPE IF EXISTS provider_type;
DROP TYPE IF EXISTS rate_basis;
DROP TYPE IF EXISTS horse_sex;
";
