//! SeaORM entities for database tables
//!
//! The child tables hold the foreign key (single source of truth for each
//! relationship); the employee side is derived through the `Related` impls.

/// Employees table entity
pub mod employee {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "employees")]
    pub struct Model {
        /// Auto-assigned identifier
        #[sea_orm(primary_key)]
        pub id: i64,

        /// Display name
        pub name: String,

        /// Date of hire
        pub hire_date: Date,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// One-to-many relationship with reviews
        #[sea_orm(has_many = "super::review::Entity")]
        Reviews,
        /// One-to-one relationship with onboardings
        #[sea_orm(has_one = "super::onboarding::Entity")]
        Onboarding,
    }

    impl Related<super::review::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Reviews.def()
        }
    }

    impl Related<super::onboarding::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Onboarding.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Reviews table entity
pub mod review {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "reviews")]
    pub struct Model {
        /// Auto-assigned identifier
        #[sea_orm(primary_key)]
        pub id: i64,

        /// Review year
        pub year: i32,

        /// Review text
        pub summary: String,

        /// Foreign key to employees; nullable until assigned
        pub employee_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to employees
        #[sea_orm(
            belongs_to = "super::employee::Entity",
            from = "Column::EmployeeId",
            to = "super::employee::Column::Id",
            on_update = "Cascade",
            on_delete = "Restrict"
        )]
        Employee,
    }

    impl Related<super::employee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Employee.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Onboardings table entity
pub mod onboarding {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "onboardings")]
    pub struct Model {
        /// Auto-assigned identifier
        #[sea_orm(primary_key)]
        pub id: i64,

        /// Orientation session timestamp
        pub orientation: DateTimeUtc,

        /// Whether the paperwork is done
        pub forms_complete: bool,

        /// Foreign key to employees; nullable but unique, which is what
        /// makes the relationship one-to-one
        #[sea_orm(unique)]
        pub employee_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Foreign key to employees
        #[sea_orm(
            belongs_to = "super::employee::Entity",
            from = "Column::EmployeeId",
            to = "super::employee::Column::Id",
            on_update = "Cascade",
            on_delete = "Restrict"
        )]
        Employee,
    }

    impl Related<super::employee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Employee.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
