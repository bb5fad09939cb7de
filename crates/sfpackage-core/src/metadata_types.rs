//! Source folder to Metadata API type names.
//!
//! Manifests are keyed by the folder a file lives in; `package.xml` needs
//! the API type that folder holds.

/// Metadata API type for a source folder, if known
pub fn api_type_name(folder: &str) -> Option<&'static str> {
    let name = match folder {
        "applications" => "CustomApplication",
        "appMenus" => "AppMenu",
        "approvalProcesses" => "ApprovalProcess",
        "assignmentRules" => "AssignmentRules",
        "aura" => "AuraDefinitionBundle",
        "authproviders" => "AuthProvider",
        "autoResponseRules" => "AutoResponseRules",
        "businessProcesses" => "BusinessProcess",
        "cachePartitions" => "PlatformCachePartition",
        "classes" => "ApexClass",
        "communities" => "Community",
        "compactLayouts" => "CompactLayout",
        "components" => "ApexComponent",
        "connectedApps" => "ConnectedApp",
        "contentassets" => "ContentAsset",
        "customMetadata" => "CustomMetadata",
        "customPermissions" => "CustomPermission",
        "dashboards" => "Dashboard",
        "documents" => "Document",
        "duplicateRules" => "DuplicateRule",
        "email" => "EmailTemplate",
        "escalationRules" => "EscalationRules",
        "experiences" => "ExperienceBundle",
        "fields" => "CustomField",
        "fieldSets" => "FieldSet",
        "flexipages" => "FlexiPage",
        "flowDefinitions" => "FlowDefinition",
        "flows" => "Flow",
        "globalValueSets" => "GlobalValueSet",
        "groups" => "Group",
        "homePageComponents" => "HomePageComponent",
        "homePageLayouts" => "HomePageLayout",
        "labels" => "CustomLabels",
        "layouts" => "Layout",
        "letterhead" => "Letterhead",
        "listViews" => "ListView",
        "lwc" => "LightningComponentBundle",
        "matchingRules" => "MatchingRules",
        "namedCredentials" => "NamedCredential",
        "objects" => "CustomObject",
        "objectTranslations" => "CustomObjectTranslation",
        "pages" => "ApexPage",
        "pathAssistants" => "PathAssistant",
        "permissionsets" => "PermissionSet",
        "permissionsetgroups" => "PermissionSetGroup",
        "platformEventChannels" => "PlatformEventChannel",
        "profiles" => "Profile",
        "queues" => "Queue",
        "quickActions" => "QuickAction",
        "recordTypes" => "RecordType",
        "remoteSiteSettings" => "RemoteSiteSetting",
        "reports" => "Report",
        "reportTypes" => "ReportType",
        "roles" => "Role",
        "settings" => "Settings",
        "sharingRules" => "SharingRules",
        "sites" => "CustomSite",
        "staticresources" => "StaticResource",
        "tabs" => "CustomTab",
        "triggers" => "ApexTrigger",
        "validationRules" => "ValidationRule",
        "webLinks" => "WebLink",
        "workflows" => "Workflow",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_folders() {
        assert_eq!(api_type_name("classes"), Some("ApexClass"));
        assert_eq!(api_type_name("fields"), Some("CustomField"));
        assert_eq!(api_type_name("email"), Some("EmailTemplate"));
    }

    #[test]
    fn test_unknown_folder() {
        assert_eq!(api_type_name("somethingNew"), None);
    }
}
