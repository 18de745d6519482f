//! Resource Type Registry
//!
//! Static table mapping the short tokens users type (vm, vnets, publicip, ...)
//! to the canonical ARM resource type they stand for, together with the API
//! version to request and a category used for grouping in `aliases` output.
//!
//! The table is fixed at compile time; the alias index is built once on first
//! lookup and never mutated afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Coarse grouping of resource types for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Network,
    Compute,
    Storage,
    Security,
    AppService,
    Database,
    Container,
}

impl Category {
    /// Display order for `aliases` output
    pub const ALL: [Category; 7] = [
        Category::Network,
        Category::Compute,
        Category::Storage,
        Category::Security,
        Category::AppService,
        Category::Database,
        Category::Container,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Network => "Network",
            Category::Compute => "Compute",
            Category::Storage => "Storage",
            Category::Security => "Security",
            Category::AppService => "App Service",
            Category::Database => "Database",
            Category::Container => "Container",
        }
    }
}

/// One registered resource type
#[derive(Debug)]
pub struct ResourceType {
    /// Canonical ARM type, e.g. "Microsoft.Compute/virtualMachines"
    pub canonical: &'static str,
    /// ARM api-version to request for this type
    pub api_version: &'static str,
    pub category: Category,
    pub display_name: &'static str,
    /// User-facing tokens resolving to this type (lowercase)
    pub synonyms: &'static [&'static str],
}

/// All registered resource types, in canonical fetch order.
/// Multi-type commands walk this slice front to back, which is what makes
/// their output order deterministic.
static RESOURCE_TYPES: &[ResourceType] = &[
    // Network
    ResourceType {
        canonical: "Microsoft.Network/virtualNetworks",
        api_version: "2023-05-01",
        category: Category::Network,
        display_name: "Virtual Networks",
        synonyms: &["network", "networks", "vnet", "vnets"],
    },
    ResourceType {
        canonical: "Microsoft.Network/networkSecurityGroups",
        api_version: "2023-05-01",
        category: Category::Network,
        display_name: "Network Security Groups",
        synonyms: &["nsg", "nsgs"],
    },
    ResourceType {
        canonical: "Microsoft.Network/publicIPAddresses",
        api_version: "2023-05-01",
        category: Category::Network,
        display_name: "Public IP Addresses",
        synonyms: &["publicip", "publicips"],
    },
    ResourceType {
        canonical: "Microsoft.Network/networkInterfaces",
        api_version: "2023-05-01",
        category: Category::Network,
        display_name: "Network Interfaces",
        synonyms: &["nic", "nics"],
    },
    ResourceType {
        canonical: "Microsoft.Network/loadBalancers",
        api_version: "2023-05-01",
        category: Category::Network,
        display_name: "Load Balancers",
        synonyms: &["loadbalancer", "loadbalancers"],
    },
    // Compute
    ResourceType {
        canonical: "Microsoft.Compute/virtualMachines",
        api_version: "2023-03-01",
        category: Category::Compute,
        display_name: "Virtual Machines",
        synonyms: &["vm", "vms"],
    },
    ResourceType {
        canonical: "Microsoft.Compute/virtualMachineScaleSets",
        api_version: "2023-03-01",
        category: Category::Compute,
        display_name: "VM Scale Sets",
        synonyms: &["vmss"],
    },
    ResourceType {
        canonical: "Microsoft.Compute/disks",
        api_version: "2023-01-02",
        category: Category::Compute,
        display_name: "Managed Disks",
        synonyms: &["disk", "disks"],
    },
    // Storage
    ResourceType {
        canonical: "Microsoft.Storage/storageAccounts",
        api_version: "2023-01-01",
        category: Category::Storage,
        display_name: "Storage Accounts",
        synonyms: &["storage", "storageaccount", "storageaccounts"],
    },
    // Security
    ResourceType {
        canonical: "Microsoft.KeyVault/vaults",
        api_version: "2023-02-01",
        category: Category::Security,
        display_name: "Key Vaults",
        synonyms: &["keyvault", "keyvaults", "kv"],
    },
    // App Service
    ResourceType {
        canonical: "Microsoft.Web/sites",
        api_version: "2022-09-01",
        category: Category::AppService,
        display_name: "Web Apps",
        synonyms: &["webapp", "webapps", "appservice", "appservices"],
    },
    // Database
    ResourceType {
        canonical: "Microsoft.Sql/servers",
        api_version: "2022-05-01-preview",
        category: Category::Database,
        display_name: "SQL Servers",
        synonyms: &["sql", "sqlserver", "sqlservers"],
    },
    ResourceType {
        canonical: "Microsoft.DocumentDB/databaseAccounts",
        api_version: "2023-04-15",
        category: Category::Database,
        display_name: "Cosmos DB Accounts",
        synonyms: &["cosmosdb"],
    },
    // Container
    ResourceType {
        canonical: "Microsoft.ContainerService/managedClusters",
        api_version: "2023-05-01",
        category: Category::Container,
        display_name: "AKS Clusters",
        synonyms: &["aks"],
    },
    ResourceType {
        canonical: "Microsoft.ContainerRegistry/registries",
        api_version: "2023-01-01-preview",
        category: Category::Container,
        display_name: "Container Registries",
        synonyms: &["acr", "containerregistry"],
    },
];

/// Alias index (built on first access)
static ALIAS_INDEX: OnceLock<HashMap<&'static str, &'static ResourceType>> = OnceLock::new();

fn alias_index() -> &'static HashMap<&'static str, &'static ResourceType> {
    ALIAS_INDEX.get_or_init(|| {
        let mut index = HashMap::new();
        for resource_type in RESOURCE_TYPES {
            for synonym in resource_type.synonyms {
                let previous = index.insert(*synonym, resource_type);
                debug_assert!(
                    previous.is_none(),
                    "duplicate synonym '{synonym}' in registry"
                );
            }
        }
        index
    })
}

/// All registered resource types in canonical fetch order
pub fn all() -> &'static [ResourceType] {
    RESOURCE_TYPES
}

/// Resolve a user-supplied token to its resource type.
/// Lookup is case-insensitive and ignores surrounding whitespace.
pub fn resolve(token: &str) -> Option<&'static ResourceType> {
    let normalized = token.trim().to_lowercase();
    alias_index().get(normalized.as_str()).copied()
}

/// Registered types grouped by category, in display order.
/// Restartable: each call yields a fresh iteration over the static table.
pub fn categories() -> impl Iterator<Item = (Category, Vec<&'static ResourceType>)> {
    Category::ALL.into_iter().map(|category| {
        let types = RESOURCE_TYPES
            .iter()
            .filter(|rt| rt.category == category)
            .collect();
        (category, types)
    })
}
