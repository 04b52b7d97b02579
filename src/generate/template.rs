//! The aggregator file template.
//!
//! Output is a pure function of the import base and the module sequence:
//! no timestamps, no environment, nothing carried over from earlier passes.

use crate::scan::ModuleName;

pub const PROVENANCE: &str = "// Generated by pinia-autorefs. Changes to this file will be overwritten.";
pub const FRAMEWORK_MODULE: &str = "vue";

const AUGMENTATION: &str = "\
declare module 'vue' {
  export type AutoToRefs<T> = {
    [K in keyof T]: T[K] extends Function ? T[K] : ToRef<T[K]>
  }
}
";

const USE_STORE: &str = "\
export function useStore<T extends keyof typeof storeExports>(storeName: T) {
  const store = storeExports[storeName]()
  const storeRefs = storeToRefs(store)
  return { ...store, ...storeRefs } as unknown as AutoToRefs<ReturnType<typeof storeExports[T]>>
}
";

/// Assemble the artifact.
///
/// Sections, in order: provenance, framework type import, one import per
/// module, the `AutoToRefs` augmentation, `storeExports`, `useStore`.
/// Imports and `storeExports` entries follow `modules` order exactly.
pub fn render_artifact(import_base: &str, modules: &[ModuleName]) -> String {
    let mut output = String::new();

    output.push_str(PROVENANCE);
    output.push('\n');
    output.push_str(&format!(
        "import {{ AutoToRefs, ToRef }} from '{}'\n\n",
        FRAMEWORK_MODULE
    ));

    for module in modules {
        output.push_str(&format!(
            "import {} from '{}/{}'\n",
            module.binding(),
            import_base,
            module
        ));
    }

    output.push('\n');
    output.push_str(AUGMENTATION);
    output.push('\n');

    output.push_str("const storeExports = {\n");
    for module in modules {
        output.push_str(&format!("  {}: {},\n", module, module.binding()));
    }
    output.push_str("}\n\n");

    output.push_str(USE_STORE);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<ModuleName> {
        list.iter().map(|n| ModuleName::new(*n)).collect()
    }

    #[test]
    fn test_user_and_cart_artifact() {
        let artifact = render_artifact("@/store", &names(&["user", "cart"]));

        let expected = "\
// Generated by pinia-autorefs. Changes to this file will be overwritten.
import { AutoToRefs, ToRef } from 'vue'

import userStore from '@/store/user'
import cartStore from '@/store/cart'

declare module 'vue' {
  export type AutoToRefs<T> = {
    [K in keyof T]: T[K] extends Function ? T[K] : ToRef<T[K]>
  }
}

const storeExports = {
  user: userStore,
  cart: cartStore,
}

export function useStore<T extends keyof typeof storeExports>(storeName: T) {
  const store = storeExports[storeName]()
  const storeRefs = storeToRefs(store)
  return { ...store, ...storeRefs } as unknown as AutoToRefs<ReturnType<typeof storeExports[T]>>
}
";
        assert_eq!(artifact, expected);
    }

    #[test]
    fn test_no_modules_still_renders_skeleton() {
        let artifact = render_artifact("@/store", &[]);
        assert!(artifact.contains("const storeExports = {\n}\n"));
        assert!(artifact.contains("export function useStore"));
        assert!(!artifact.contains("Store from '"));
    }

    #[test]
    fn test_import_and_export_order_match() {
        let modules = names(&["zeta", "alpha", "mid"]);
        let artifact = render_artifact("@/store", &modules);

        let imports: Vec<&str> = artifact
            .lines()
            .filter_map(|l| l.strip_prefix("import "))
            .filter_map(|l| l.split_once("Store from '@/store/"))
            .map(|(binding, _)| binding)
            .collect();
        let exports: Vec<&str> = artifact
            .lines()
            .filter_map(|l| l.strip_prefix("  "))
            .filter_map(|l| l.split_once(": "))
            .filter(|(_, v)| v.ends_with("Store,"))
            .map(|(k, _)| k)
            .collect();

        assert_eq!(imports, vec!["zeta", "alpha", "mid"]);
        assert_eq!(imports, exports);
    }

    #[test]
    fn test_unaliased_import_base() {
        let artifact = render_artifact("lib/store", &names(&["user"]));
        assert!(artifact.contains("import userStore from 'lib/store/user'\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let modules = names(&["a", "b"]);
        assert_eq!(
            render_artifact("@/store", &modules),
            render_artifact("@/store", &modules)
        );
    }
}
