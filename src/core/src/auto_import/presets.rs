/* src/core/src/auto_import/presets.rs */

use std::collections::BTreeMap;

const VUE: &[&str] = &[
  "EffectScope",
  "computed",
  "createApp",
  "customRef",
  "defineAsyncComponent",
  "defineComponent",
  "effectScope",
  "getCurrentInstance",
  "getCurrentScope",
  "h",
  "inject",
  "isProxy",
  "isReactive",
  "isReadonly",
  "isRef",
  "markRaw",
  "nextTick",
  "onActivated",
  "onBeforeMount",
  "onBeforeUnmount",
  "onBeforeUpdate",
  "onDeactivated",
  "onErrorCaptured",
  "onMounted",
  "onRenderTracked",
  "onRenderTriggered",
  "onScopeDispose",
  "onServerPrefetch",
  "onUnmounted",
  "onUpdated",
  "onWatcherCleanup",
  "provide",
  "reactive",
  "readonly",
  "ref",
  "resolveComponent",
  "shallowReactive",
  "shallowReadonly",
  "shallowRef",
  "toRaw",
  "toRef",
  "toRefs",
  "toValue",
  "triggerRef",
  "unref",
  "useAttrs",
  "useCssModule",
  "useCssVars",
  "useId",
  "useModel",
  "useSlots",
  "useTemplateRef",
  "watch",
  "watchEffect",
  "watchPostEffect",
  "watchSyncEffect",
];

const VUE_ROUTER: &[&str] =
  &["onBeforeRouteLeave", "onBeforeRouteUpdate", "useLink", "useRoute", "useRouter"];

const PINIA: &[&str] = &[
  "acceptHMRUpdate",
  "createPinia",
  "defineStore",
  "getActivePinia",
  "mapActions",
  "mapGetters",
  "mapState",
  "mapStores",
  "mapWritableState",
  "setActivePinia",
  "setMapStoreSuffix",
  "storeToRefs",
];

/// Symbol sets used for bare-module sources. Built-ins cover `vue`,
/// `vue-router` and `pinia`; projects add or replace presets by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRegistry {
  presets: BTreeMap<String, Vec<String>>,
}

impl Default for PresetRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

impl PresetRegistry {
  pub fn builtin() -> Self {
    let presets = [("vue", VUE), ("vue-router", VUE_ROUTER), ("pinia", PINIA)]
      .into_iter()
      .map(|(name, symbols)| (name.to_string(), symbols.iter().map(|s| (*s).to_string()).collect()))
      .collect();
    Self { presets }
  }

  pub fn empty() -> Self {
    Self { presets: BTreeMap::new() }
  }

  /// Add a preset, replacing a built-in of the same name.
  pub fn with_preset(mut self, module: impl Into<String>, symbols: Vec<String>) -> Self {
    self.presets.insert(module.into(), symbols);
    self
  }

  pub fn get(&self, module: &str) -> Option<&[String]> {
    self.presets.get(module).map(Vec::as_slice)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.presets.keys().map(String::as_str)
  }
}
