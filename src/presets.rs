//! Static catalog of package presets grouped by technology category

use crate::error::ConfigError;
use serde::Serialize;

/// A named collection of packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Lookup key, e.g. `react-stack`
    pub key: &'static str,
    /// Human-readable name
    pub name: &'static str,
    pub packages: &'static [&'static str],
}

/// A category of presets, e.g. `frontend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetCategory {
    pub key: &'static str,
    pub presets: &'static [Preset],
}

impl PresetCategory {
    /// Find a preset of this category by key
    pub fn preset(&self, key: &str) -> Result<&'static Preset, ConfigError> {
        self.presets
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| ConfigError::UnknownPreset {
                category: self.key.to_string(),
                preset: key.to_string(),
            })
    }
}

const FRONTEND: &[Preset] = &[
    Preset {
        key: "react-stack",
        name: "React Frontend Stack",
        packages: &[
            "react",
            "react-dom",
            "next",
            "tailwindcss",
            "zustand",
            "@tanstack/react-query",
            "axios",
            "framer-motion",
            "react-router-dom",
        ],
    },
    Preset {
        key: "vue-stack",
        name: "Vue Frontend Stack",
        packages: &[
            "vue",
            "vue-router",
            "pinia",
            "nuxt",
            "tailwindcss",
            "axios",
            "@vueuse/core",
            "vuex",
        ],
    },
    Preset {
        key: "svelte-stack",
        name: "Svelte Frontend Stack",
        packages: &[
            "svelte",
            "sveltekit",
            "svelte-routing",
            "tailwindcss",
            "axios",
            "svelte-store",
        ],
    },
    Preset {
        key: "angular-stack",
        name: "Angular Frontend Stack",
        packages: &[
            "@angular/core",
            "@angular/router",
            "@ngrx/store",
            "tailwindcss",
            "axios",
            "rxjs",
        ],
    },
];

const BACKEND: &[Preset] = &[
    Preset {
        key: "node-express",
        name: "Node.js Express Backend Stack",
        packages: &[
            "express",
            "mongoose",
            "sequelize",
            "passport",
            "jsonwebtoken",
            "bcrypt",
            "cors",
            "helmet",
            "winston",
        ],
    },
    Preset {
        key: "nest-prisma",
        name: "NestJS Prisma Backend Stack",
        packages: &[
            "@nestjs/core",
            "@nestjs/passport",
            "prisma",
            "@prisma/client",
            "class-validator",
            "class-transformer",
            "rxjs",
            "swagger-ui-express",
        ],
    },
    Preset {
        key: "django-python",
        name: "Django Python Backend Stack",
        packages: &[
            "django",
            "djangorestframework",
            "django-cors-headers",
            "django-filter",
            "psycopg2-binary",
            "gunicorn",
            "drf-yasg",
        ],
    },
    Preset {
        key: "fastapi-python",
        name: "FastAPI Python Backend Stack",
        packages: &[
            "fastapi",
            "uvicorn",
            "sqlalchemy",
            "pydantic",
            "alembic",
            "passlib",
            "python-jose",
            "httpx",
        ],
    },
];

const TESTING: &[Preset] = &[
    Preset {
        key: "frontend-testing",
        name: "Frontend Testing Stack",
        packages: &[
            "jest",
            "@testing-library/react",
            "@testing-library/jest-dom",
            "cypress",
            "playwright",
            "vitest",
            "storybook",
            "@storybook/react",
        ],
    },
    Preset {
        key: "backend-testing",
        name: "Backend Testing Stack",
        packages: &[
            "mocha",
            "chai",
            "sinon",
            "supertest",
            "testcontainers",
            "faker",
            "istanbul",
        ],
    },
];

const STYLING: &[Preset] = &[
    Preset {
        key: "css-frameworks",
        name: "CSS Frameworks and Styling Libraries",
        packages: &[
            "tailwindcss",
            "sass",
            "styled-components",
            "@emotion/react",
            "@emotion/styled",
            "postcss",
            "autoprefixer",
            "bootstrap",
            "bulma",
        ],
    },
    Preset {
        key: "design-system",
        name: "Design System and Component Libraries",
        packages: &[
            "@chakra-ui/react",
            "antd",
            "material-ui",
            "@headlessui/react",
            "radix-ui",
            "react-bootstrap",
        ],
    },
];

const STATE: &[Preset] = &[
    Preset {
        key: "react-state",
        name: "React State Management",
        packages: &[
            "zustand",
            "recoil",
            "jotai",
            "mobx",
            "redux",
            "redux-toolkit",
            "context",
        ],
    },
    Preset {
        key: "vue-state",
        name: "Vue State Management",
        packages: &["pinia", "vuex", "vuex-persist", "vue-rx"],
    },
];

/// All preset categories in display order
pub const CATEGORIES: &[PresetCategory] = &[
    PresetCategory {
        key: "frontend",
        presets: FRONTEND,
    },
    PresetCategory {
        key: "backend",
        presets: BACKEND,
    },
    PresetCategory {
        key: "testing",
        presets: TESTING,
    },
    PresetCategory {
        key: "styling",
        presets: STYLING,
    },
    PresetCategory {
        key: "state",
        presets: STATE,
    },
];

/// Find a category by key
pub fn category(key: &str) -> Result<&'static PresetCategory, ConfigError> {
    CATEGORIES
        .iter()
        .find(|c| c.key == key)
        .ok_or_else(|| ConfigError::UnknownCategory {
            category: key.to_string(),
        })
}

/// Find a preset by category and preset key
pub fn find_preset(category_key: &str, preset_key: &str) -> Result<&'static Preset, ConfigError> {
    category(category_key)?.preset(preset_key)
}
