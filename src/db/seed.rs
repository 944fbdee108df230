//! Fixed sample fleet inserted by `POST /api/seed`.

/// Sample equipment: code, name, type, usage hours, maintenance limit.
pub struct SampleEquipment {
    pub code: &'static str,
    pub name: &'static str,
    pub equipment_type: &'static str,
    pub usage_hours: i64,
    pub maintenance_limit: i64,
}

/// Sample maintenance, linked to its equipment by code.
pub struct SampleMaintenance {
    pub equipment_code: &'static str,
    pub service_date: &'static str,
    pub maintenance_type: &'static str,
    pub technician: &'static str,
    pub description: &'static str,
    pub usage_at_service: i64,
}

pub const SAMPLE_EQUIPMENT: &[SampleEquipment] = &[
    SampleEquipment {
        code: "ATL-ST18-005",
        name: "Atlas Copco ST18",
        equipment_type: "Scooptram",
        usage_hours: 3400,
        maintenance_limit: 4000,
    },
    SampleEquipment {
        code: "BEL-B60E-008",
        name: "Bell B60E",
        equipment_type: "Articulated Truck",
        usage_hours: 6100,
        maintenance_limit: 5000,
    },
    SampleEquipment {
        code: "CAT-797F-001",
        name: "Caterpillar 797F",
        equipment_type: "Haul Truck",
        usage_hours: 4200,
        maintenance_limit: 5000,
    },
    SampleEquipment {
        code: "EPI-BM2-006",
        name: "Epiroc Boomer M2",
        equipment_type: "Face Drill",
        usage_hours: 2900,
        maintenance_limit: 3000,
    },
    SampleEquipment {
        code: "HIT-EX8000-007",
        name: "Hitachi EX8000",
        equipment_type: "Excavator",
        usage_hours: 1800,
        maintenance_limit: 2500,
    },
    SampleEquipment {
        code: "KOM-PC8000-002",
        name: "Komatsu PC8000",
        equipment_type: "Excavator",
        usage_hours: 4850,
        maintenance_limit: 5000,
    },
    SampleEquipment {
        code: "LIE-T284-003",
        name: "Liebherr T 284",
        equipment_type: "Haul Truck",
        usage_hours: 5200,
        maintenance_limit: 5000,
    },
    SampleEquipment {
        code: "SAN-DD422-004",
        name: "Sandvik DD422i",
        equipment_type: "Drill Jumbo",
        usage_hours: 2100,
        maintenance_limit: 3000,
    },
];

pub const SAMPLE_MAINTENANCE: &[SampleMaintenance] = &[
    SampleMaintenance {
        equipment_code: "BEL-B60E-008",
        service_date: "2024-03-15",
        maintenance_type: "Engine Overhaul",
        technician: "John Smith",
        description: "Complete engine teardown and rebuild",
        usage_at_service: 5500,
    },
    SampleMaintenance {
        equipment_code: "CAT-797F-001",
        service_date: "2024-03-10",
        maintenance_type: "Brake Inspection",
        technician: "Maria Garcia",
        description: "Brake system check and pad replacement",
        usage_at_service: 4000,
    },
    SampleMaintenance {
        equipment_code: "ATL-ST18-005",
        service_date: "2024-03-05",
        maintenance_type: "Hydraulic Service",
        technician: "Robert Chen",
        description: "Hydraulic fluid change and hose inspection",
        usage_at_service: 3200,
    },
];
